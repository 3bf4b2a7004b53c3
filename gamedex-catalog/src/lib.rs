//! Game catalog data model types and seed dataset I/O.
//!
//! This crate defines the persistent data model for the game catalog without
//! any database dependencies. Consumers can use these types directly for
//! serialization, display, or passing to `gamedex-db` for persistence.

pub mod seed;
pub mod types;

pub use seed::{SeedError, SeedGame, load_seed};
pub use types::*;
