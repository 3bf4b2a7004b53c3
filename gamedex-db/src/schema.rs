//! SQLite schema creation.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Open or create the catalog database at the given path.
///
/// Enables WAL and foreign-key enforcement (memberships cascade on delete),
/// then ensures the schema exists. Safe to call on every process start.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    create_indexes(&conn)?;
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    create_indexes(&conn)?;
    Ok(conn)
}

/// Create all tables if they don't exist.
///
/// Idempotent. Table creations are independent: a failure is logged and the
/// remaining tables are still attempted, with the first error returned.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    let mut first_err = None;
    for (name, sql) in TABLES {
        if let Err(e) = conn.execute(sql, []) {
            log::error!("failed to create {name} table: {e}");
            first_err.get_or_insert(e);
        }
    }
    match first_err {
        None => Ok(()),
        Some(e) => Err(e.into()),
    }
}

/// Create the secondary indexes backing provider filtering and title sort.
///
/// Idempotent. The importer re-runs this after seeding.
pub fn create_indexes(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_games_provider ON games(provider);
         CREATE INDEX IF NOT EXISTS idx_games_title ON games(title);",
    )?;
    Ok(())
}

const TABLES: [(&str, &str); 4] = [
    (
        "games",
        "CREATE TABLE IF NOT EXISTS games (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url TEXT NOT NULL,
            title TEXT NOT NULL,
            provider TEXT NOT NULL,
            image_path TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
    ),
    (
        "providers",
        "CREATE TABLE IF NOT EXISTS providers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        )",
    ),
    (
        "collections",
        "CREATE TABLE IF NOT EXISTS collections (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL,
            description TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
    ),
    (
        "collection_games",
        "CREATE TABLE IF NOT EXISTS collection_games (
            collection_id INTEGER NOT NULL,
            game_id INTEGER NOT NULL,
            added_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (collection_id, game_id),
            FOREIGN KEY (collection_id) REFERENCES collections(id) ON DELETE CASCADE,
            FOREIGN KEY (game_id) REFERENCES games(id) ON DELETE CASCADE
        )",
    ),
];
