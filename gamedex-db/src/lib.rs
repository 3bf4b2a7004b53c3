//! SQLite persistence layer for the game catalog.
//!
//! Provides schema creation, the listing query composer, read queries, and
//! collection CRUD backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod query;
pub mod schema;

pub use operations::{
    OperationError, add_game_to_collection, create_collection, delete_collection,
    remove_game_from_collection, update_collection,
};
pub use queries::{
    collection_games, collections_with_counts, games_by_ids, is_in_collection, list_games,
    list_providers,
};
pub use query::{GameListQuery, ProviderFilter, SortOrder};
pub use schema::{SchemaError, create_indexes, create_schema, open_database, open_memory};
