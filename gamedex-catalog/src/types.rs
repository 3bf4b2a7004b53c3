//! Data model types for the game catalog.
//!
//! These types represent the persistent catalog schema (games, providers,
//! collections, memberships) plus the result shapes the browsing API serves.

use serde::{Deserialize, Serialize};

// ── Game ────────────────────────────────────────────────────────────────────

/// A catalog entry: one browsable game.
///
/// Games are created by the bulk importer and read-only afterward. The
/// provider is stored denormalized as a name; there is no foreign key into
/// the providers table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub provider: String,
    pub image_path: String,
    pub created_at: String,
}

/// One page of games plus the pagination metadata that describes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePage {
    pub games: Vec<Game>,
    pub metadata: PageMeta,
}

/// Pagination metadata for a filtered listing.
///
/// `total_games` counts every row matching the active filters, not just the
/// returned slice, and `total_pages` is `ceil(total_games / games_per_page)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_games: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub games_per_page: i64,
}

// ── Provider ────────────────────────────────────────────────────────────────

/// The distinct provider names known to the catalog, with the `"All"`
/// sentinel prepended for the filter UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderList {
    pub providers: Vec<String>,
    pub total: i64,
}

// ── Collection ──────────────────────────────────────────────────────────────

/// A named, user-managed group of games.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

/// A collection augmented with its member count for listing screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub game_count: i64,
}

// ── Membership ──────────────────────────────────────────────────────────────

/// Outcome of adding a game to a collection.
///
/// `added` is false when the pair already existed; the duplicate insert is a
/// no-op enforced by the composite primary key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipAdded {
    pub collection_id: i64,
    pub game_id: i64,
    pub added: bool,
}

/// Outcome of removing a game from a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipRemoved {
    pub collection_id: i64,
    pub game_id: i64,
    pub removed: bool,
}
