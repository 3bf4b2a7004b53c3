//! Read queries for the catalog database.
//!
//! Provides the paged game listing, id-set lookup, provider enumeration,
//! and collection reads.

use gamedex_catalog::types::*;
use rusqlite::{Connection, params, params_from_iter};

use crate::operations::OperationError;
use crate::query::{self, GameListQuery};

// ── Game Listings ───────────────────────────────────────────────────────────

/// Run a listing request, returning one page of games plus metadata.
///
/// The count and page statements are composed from the same filter list, so
/// `metadata.total_games` always reflects exactly the filters applied to the
/// returned rows.
pub fn list_games(conn: &Connection, query: &GameListQuery) -> Result<GamePage, OperationError> {
    let composed = query::compose(query);

    let total: i64 = conn.query_row(
        &composed.count_sql,
        params_from_iter(composed.filter_params.iter()),
        |row| row.get(0),
    )?;

    let mut stmt = conn.prepare(&composed.select_sql)?;
    let bound = composed
        .filter_params
        .iter()
        .chain(composed.page_params.iter());
    let games = stmt
        .query_map(params_from_iter(bound), row_to_game)?
        .collect::<Result<Vec<_>, _>>()?;

    let limit = query.limit();
    Ok(GamePage {
        games,
        metadata: PageMeta {
            total_games: total,
            total_pages: (total as u64).div_ceil(limit as u64) as i64,
            current_page: query.page(),
            games_per_page: limit,
        },
    })
}

/// Fetch games by an explicit id set (the favorites view).
///
/// An empty set short-circuits to an empty result without touching storage.
pub fn games_by_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<Game>, OperationError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(",");
    let mut stmt = conn.prepare(&format!(
        "SELECT id, url, title, provider, image_path, created_at
         FROM games WHERE id IN ({placeholders})"
    ))?;
    let rows = stmt.query_map(params_from_iter(ids.iter()), row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Provider Queries ────────────────────────────────────────────────────────

/// List the distinct provider names, sorted, with the `"All"` sentinel
/// prepended.
pub fn list_providers(conn: &Connection) -> Result<ProviderList, OperationError> {
    let mut stmt = conn.prepare("SELECT name FROM providers ORDER BY name")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut providers = Vec::with_capacity(names.len() + 1);
    providers.push("All".to_string());
    providers.extend(names);
    let total = providers.len() as i64;

    Ok(ProviderList { providers, total })
}

// ── Collection Queries ──────────────────────────────────────────────────────

/// List every collection with its member count, ordered by name.
///
/// The LEFT JOIN keeps zero-member collections in the result.
pub fn collections_with_counts(conn: &Connection) -> Result<Vec<CollectionSummary>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT collections.id, collections.name, collections.description,
                collections.created_at, COUNT(collection_games.game_id) AS game_count
         FROM collections
         LEFT JOIN collection_games ON collections.id = collection_games.collection_id
         GROUP BY collections.id
         ORDER BY collections.name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(CollectionSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: row.get(3)?,
            game_count: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List the games in a collection, ordered by title.
pub fn collection_games(
    conn: &Connection,
    collection_id: i64,
) -> Result<Vec<Game>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT games.id, games.url, games.title, games.provider,
                games.image_path, games.created_at
         FROM games
         JOIN collection_games ON games.id = collection_games.game_id
         WHERE collection_games.collection_id = ?1
         ORDER BY games.title",
    )?;
    let rows = stmt.query_map(params![collection_id], row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Check whether a game belongs to a collection.
pub fn is_in_collection(
    conn: &Connection,
    collection_id: i64,
    game_id: i64,
) -> Result<bool, OperationError> {
    let result = conn.query_row(
        "SELECT 1 FROM collection_games WHERE collection_id = ?1 AND game_id = ?2",
        params![collection_id, game_id],
        |_| Ok(()),
    );
    match result {
        Ok(()) => Ok(true),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_game(row: &rusqlite::Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        url: row.get(1)?,
        title: row.get(2)?,
        provider: row.get(3)?,
        image_path: row.get(4)?,
        created_at: row.get(5)?,
    })
}
