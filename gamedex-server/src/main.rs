//! gamedex server
//!
//! Serves the game catalog API plus the client build and images. On startup
//! the database is opened (and provisioned if absent), the seed dataset is
//! imported into an empty catalog, and the shared handle is closed again
//! once the server drains on a termination signal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{Router, middleware};
use clap::Parser;
use gamedex_import::LogProgress;
use gamedex_server::routes::{self, log_requests};
use gamedex_server::state::AppState;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

#[derive(Parser)]
#[command(name = "gamedex")]
#[command(about = "Game catalog browsing server", long_about = None)]
struct Cli {
    /// Port to listen on (default: the PORT environment variable, then 5000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the SQLite database file
    #[arg(long, default_value = "database.sqlite")]
    database: PathBuf,

    /// Path to the JSON seed dataset consumed on first startup
    #[arg(long, default_value = "games.json")]
    seed: PathBuf,

    /// Directory with the built client assets
    #[arg(long, default_value = "client/build")]
    static_dir: PathBuf,

    /// Directory with the game images
    #[arg(long, default_value = "images")]
    images_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let port = cli
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(5000);

    let conn = gamedex_db::open_database(&cli.database)
        .with_context(|| format!("opening database at {}", cli.database.display()))?;
    log::info!("connected to the SQLite database at {}", cli.database.display());

    // Fire-and-forget seeding: a failed import is logged and the server
    // still comes up; a restart re-attempts it against the empty table.
    if let Err(e) = gamedex_import::import_if_empty(&conn, &cli.seed, &LogProgress) {
        log::error!("bulk import failed: {e}");
    }

    let state = AppState::new(conn);

    let spa = ServeDir::new(&cli.static_dir)
        .not_found_service(ServeFile::new(cli.static_dir.join("index.html")));
    let app = Router::new()
        .nest("/api", routes::api_router())
        .nest_service("/images", ServeDir::new(&cli.images_dir))
        .fallback_service(spa)
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("binding port {port}"))?;
    log::info!("server running on port {port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    close_database(state);
    Ok(())
}

/// Resolve when the process receives ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to install ctrl-c handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, closing database connection...");
}

/// Close the shared handle once the server has drained.
fn close_database(state: AppState) {
    match Arc::try_unwrap(state.db) {
        Ok(mutex) => {
            if let Err((_, e)) = mutex.into_inner().close() {
                log::error!("error closing database: {e}");
            } else {
                log::info!("closed the database connection");
            }
        }
        Err(_) => log::warn!("database handle still shared at shutdown, skipping close"),
    }
}
