//! Shared server state.

use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

/// The process-wide storage handle.
///
/// One connection is opened at startup and borrowed by every request; the
/// mutex serializes access, matching SQLite's single-writer model. The
/// binary closes the connection once after the server drains.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }
}
