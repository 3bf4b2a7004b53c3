//! Bulk seeding of the game catalog from the JSON dataset.
//!
//! This crate owns the one-time import: reading the scraped dataset,
//! inserting games and their distinct providers inside a single transaction,
//! and triggering index creation afterward.

pub mod json_import;
pub mod progress;

pub use json_import::{ImportError, ImportStats, import_if_empty};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
