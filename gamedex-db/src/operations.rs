//! Write operations for collections and memberships.

use gamedex_catalog::types::*;
use rusqlite::{Connection, params};
use thiserror::Error;

/// Errors surfaced by the catalog access layer.
///
/// The three variants map onto the API's error classes: storage failures,
/// not-found outcomes, and input validation failures. Callers can tell them
/// apart to decide whether a retry makes sense.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{entity} not found: id {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

fn validate_name(name: &str) -> Result<&str, OperationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(OperationError::Invalid {
            field: "name",
            reason: "must not be blank",
        });
    }
    Ok(name)
}

// ── Collection CRUD ─────────────────────────────────────────────────────────

/// Create a collection. The name must be non-blank; uniqueness is enforced
/// by the schema and surfaces as a storage error.
pub fn create_collection(
    conn: &Connection,
    name: &str,
    description: &str,
) -> Result<Collection, OperationError> {
    let name = validate_name(name)?;
    conn.execute(
        "INSERT INTO collections (name, description) VALUES (?1, ?2)",
        params![name, description],
    )?;
    collection_by_id(conn, conn.last_insert_rowid())
}

/// Update a collection's name and description.
///
/// Zero rows affected means the collection does not exist and is reported
/// as `NotFound` for the caller to surface.
pub fn update_collection(
    conn: &Connection,
    id: i64,
    name: &str,
    description: &str,
) -> Result<Collection, OperationError> {
    let name = validate_name(name)?;
    let changed = conn.execute(
        "UPDATE collections SET name = ?1, description = ?2 WHERE id = ?3",
        params![name, description, id],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity: "collection",
            id,
        });
    }
    collection_by_id(conn, id)
}

/// Delete a collection. Memberships cascade with it.
pub fn delete_collection(conn: &Connection, id: i64) -> Result<(), OperationError> {
    let deleted = conn.execute("DELETE FROM collections WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(OperationError::NotFound {
            entity: "collection",
            id,
        });
    }
    Ok(())
}

fn collection_by_id(conn: &Connection, id: i64) -> Result<Collection, OperationError> {
    conn.query_row(
        "SELECT id, name, description, created_at FROM collections WHERE id = ?1",
        params![id],
        |row| {
            Ok(Collection {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .map_err(Into::into)
}

// ── Membership Operations ───────────────────────────────────────────────────

/// Add a game to a collection.
///
/// Idempotent: a duplicate pair is ignored by the composite primary key and
/// reported as `added: false`. Concurrent adds of the same pair resolve the
/// same way, with no application-level locking.
pub fn add_game_to_collection(
    conn: &Connection,
    collection_id: i64,
    game_id: i64,
) -> Result<MembershipAdded, OperationError> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO collection_games (collection_id, game_id) VALUES (?1, ?2)",
        params![collection_id, game_id],
    )?;
    Ok(MembershipAdded {
        collection_id,
        game_id,
        added: inserted > 0,
    })
}

/// Remove a game from a collection, reporting whether a row was removed.
pub fn remove_game_from_collection(
    conn: &Connection,
    collection_id: i64,
    game_id: i64,
) -> Result<MembershipRemoved, OperationError> {
    let removed = conn.execute(
        "DELETE FROM collection_games WHERE collection_id = ?1 AND game_id = ?2",
        params![collection_id, game_id],
    )?;
    Ok(MembershipRemoved {
        collection_id,
        game_id,
        removed: removed > 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{collections_with_counts, is_in_collection};
    use crate::schema::open_memory;

    fn conn_with_games() -> Connection {
        let conn = open_memory().unwrap();
        for (url, title) in [("a", "Alpha"), ("b", "Beta")] {
            conn.execute(
                "INSERT INTO games (url, title, provider, image_path) VALUES (?1, ?2, 'P1', 'i')",
                params![url, title],
            )
            .unwrap();
        }
        conn
    }

    #[test]
    fn create_rejects_blank_name() {
        let conn = open_memory().unwrap();
        let err = create_collection(&conn, "   ", "").unwrap_err();
        assert!(matches!(err, OperationError::Invalid { field: "name", .. }));
    }

    #[test]
    fn created_collection_is_listed_with_zero_members() {
        let conn = open_memory().unwrap();
        let collection = create_collection(&conn, "Favorites", "the good ones").unwrap();
        assert!(collection.id > 0);
        assert_eq!(collection.name, "Favorites");

        let summaries = collections_with_counts(&conn).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "Favorites");
        assert_eq!(summaries[0].game_count, 0);
    }

    #[test]
    fn duplicate_collection_name_is_a_storage_error() {
        let conn = open_memory().unwrap();
        create_collection(&conn, "Favorites", "").unwrap();
        let err = create_collection(&conn, "Favorites", "").unwrap_err();
        assert!(matches!(err, OperationError::Sqlite(_)));
    }

    #[test]
    fn update_missing_collection_is_not_found() {
        let conn = open_memory().unwrap();
        let err = update_collection(&conn, 42, "Renamed", "").unwrap_err();
        assert!(matches!(
            err,
            OperationError::NotFound {
                entity: "collection",
                id: 42
            }
        ));
    }

    #[test]
    fn update_rewrites_name_and_description() {
        let conn = open_memory().unwrap();
        let collection = create_collection(&conn, "Favorites", "old").unwrap();
        let updated = update_collection(&conn, collection.id, "Renamed", "new").unwrap();
        assert_eq!(updated.id, collection.id);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.description.as_deref(), Some("new"));
    }

    #[test]
    fn delete_reports_not_found_once_gone() {
        let conn = open_memory().unwrap();
        let collection = create_collection(&conn, "Favorites", "").unwrap();
        delete_collection(&conn, collection.id).unwrap();
        let err = delete_collection(&conn, collection.id).unwrap_err();
        assert!(matches!(err, OperationError::NotFound { .. }));
    }

    #[test]
    fn duplicate_add_is_a_no_op() {
        let conn = conn_with_games();
        let collection = create_collection(&conn, "Picks", "").unwrap();

        let first = add_game_to_collection(&conn, collection.id, 1).unwrap();
        assert!(first.added);
        let second = add_game_to_collection(&conn, collection.id, 1).unwrap();
        assert!(!second.added);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM collection_games", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn remove_reports_whether_a_row_existed() {
        let conn = conn_with_games();
        let collection = create_collection(&conn, "Picks", "").unwrap();
        add_game_to_collection(&conn, collection.id, 1).unwrap();

        assert!(remove_game_from_collection(&conn, collection.id, 1).unwrap().removed);
        assert!(!remove_game_from_collection(&conn, collection.id, 1).unwrap().removed);
    }

    #[test]
    fn deleting_a_collection_cascades_memberships() {
        let conn = conn_with_games();
        let collection = create_collection(&conn, "Picks", "").unwrap();
        add_game_to_collection(&conn, collection.id, 1).unwrap();
        add_game_to_collection(&conn, collection.id, 2).unwrap();

        delete_collection(&conn, collection.id).unwrap();

        let orphans: i64 = conn
            .query_row("SELECT COUNT(*) FROM collection_games", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
        assert!(!is_in_collection(&conn, collection.id, 1).unwrap());
    }

    #[test]
    fn deleting_a_game_cascades_memberships() {
        let conn = conn_with_games();
        let collection = create_collection(&conn, "Picks", "").unwrap();
        add_game_to_collection(&conn, collection.id, 1).unwrap();

        conn.execute("DELETE FROM games WHERE id = 1", []).unwrap();

        assert!(!is_in_collection(&conn, collection.id, 1).unwrap());
    }
}
