//! Import the JSON seed dataset into the catalog database.
//!
//! The import runs at most once per database: a populated games table makes
//! it a no-op. The whole pass is one transaction, so readers either observe
//! the full dataset or none of it.

use std::collections::BTreeSet;
use std::path::Path;

use gamedex_catalog::seed::{SeedError, load_seed};
use gamedex_db::schema::{SchemaError, create_indexes};
use rusqlite::{Connection, params};
use thiserror::Error;

use crate::progress::ImportProgress;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Seed dataset error: {0}")]
    Seed(#[from] SeedError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Statistics from a seed import.
#[derive(Debug, Default)]
pub struct ImportStats {
    pub games_imported: u64,
    pub providers_imported: u64,
    /// True when the games table was already populated and nothing ran.
    pub skipped: bool,
}

/// Seed the games and providers tables from the JSON dataset, unless the
/// games table already holds rows.
///
/// On any failure mid-pass the transaction rolls back in full; a process
/// restart re-attempts the import since the emptiness guard re-checks.
/// After a successful commit the secondary indexes are (re)created.
pub fn import_if_empty(
    conn: &Connection,
    seed_path: &Path,
    progress: &dyn ImportProgress,
) -> Result<ImportStats, ImportError> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
    if existing > 0 {
        log::info!("database already contains {existing} games, skipping import");
        return Ok(ImportStats {
            skipped: true,
            ..Default::default()
        });
    }

    let records = load_seed(seed_path)?;
    log::info!("starting import of {} games", records.len());

    let mut stats = ImportStats::default();
    let tx = conn.unchecked_transaction()?;
    {
        let mut insert_game = tx.prepare(
            "INSERT INTO games (url, title, provider, image_path) VALUES (?1, ?2, ?3, ?4)",
        )?;
        let mut providers = BTreeSet::new();

        for (i, record) in records.iter().enumerate() {
            insert_game.execute(params![
                record.url,
                record.title,
                record.provider,
                record.image_path,
            ])?;
            providers.insert(record.provider.as_str());
            progress.on_record(i + 1, records.len());
        }
        stats.games_imported = records.len() as u64;

        let mut insert_provider =
            tx.prepare("INSERT OR IGNORE INTO providers (name) VALUES (?1)")?;
        for provider in providers {
            stats.providers_imported += insert_provider.execute(params![provider])? as u64;
        }
    }
    tx.commit()?;

    create_indexes(conn)?;
    log::info!(
        "imported {} games and {} providers",
        stats.games_imported,
        stats.providers_imported
    );
    Ok(stats)
}
