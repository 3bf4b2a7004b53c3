//! API route table and request logging.

use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::get;

use crate::handlers;
use crate::state::AppState;

/// Build the API router. The binary (and tests) mount this under `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/games", get(handlers::get_games))
        .route("/providers", get(handlers::get_providers))
        .route(
            "/collections",
            get(handlers::get_collections).post(handlers::create_collection),
        )
        .route(
            "/collections/{id}",
            axum::routing::put(handlers::update_collection).delete(handlers::delete_collection),
        )
        .route(
            "/collections/{id}/games",
            get(handlers::get_collection_games).post(handlers::add_game),
        )
        .route(
            "/collections/{collection_id}/games/{game_id}",
            get(handlers::check_membership).delete(handlers::remove_game),
        )
        .fallback(handlers::api_not_found)
}

/// Log one line per request: method, path, status, latency.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(req).await;

    log::info!(
        "{method} {path} {} {:?}",
        response.status().as_u16(),
        start.elapsed()
    );
    response
}
