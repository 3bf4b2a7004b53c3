//! HTTP façade for the game catalog.
//!
//! Maps the catalog access layer onto REST endpoints under `/api`, serves
//! the client build and game images, and owns the process-wide storage
//! handle.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
