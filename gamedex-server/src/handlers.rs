//! HTTP handlers for the catalog API.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gamedex_catalog::types::*;
use gamedex_db::query::{GameListQuery, ProviderFilter, SortOrder};
use gamedex_db::{operations, queries};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ── Games ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct GamesParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub provider: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub collection: Option<i64>,
    pub ids: Option<String>,
}

/// Response shape for the id-set lookup (the favorites view). Intentionally
/// differs from the paged listing: just a total, no page arithmetic.
#[derive(Debug, Serialize)]
pub struct IdLookupResponse {
    pub games: Vec<Game>,
    pub metadata: IdLookupMeta,
}

#[derive(Debug, Serialize)]
pub struct IdLookupMeta {
    pub total: usize,
}

/// `GET /api/games` — paged listing, or id-set lookup when `ids` is present.
pub async fn get_games(
    State(state): State<AppState>,
    Query(params): Query<GamesParams>,
) -> ApiResult<Response> {
    let conn = state.db.lock().await;

    if let Some(raw_ids) = params.ids.as_deref() {
        let ids: Vec<i64> = raw_ids
            .split(',')
            .filter_map(|id| id.trim().parse().ok())
            .collect();
        let games = queries::games_by_ids(&conn, &ids)?;
        let total = games.len();
        return Ok(Json(IdLookupResponse {
            games,
            metadata: IdLookupMeta { total },
        })
        .into_response());
    }

    let query = GameListQuery {
        page: params.page.unwrap_or(1),
        limit: params.limit.unwrap_or(60),
        providers: params
            .provider
            .as_deref()
            .map(ProviderFilter::parse)
            .unwrap_or_default(),
        // No sort parameter means a shuffled browse page; an unrecognized
        // value falls back to insertion order.
        sort: match params.sort.as_deref() {
            None => Some(SortOrder::Random),
            Some(value) => SortOrder::parse(value),
        },
        search: params.search,
        collection_id: params.collection,
    };
    let page = queries::list_games(&conn, &query)?;
    Ok(Json(page).into_response())
}

// ── Providers ───────────────────────────────────────────────────────────────

/// `GET /api/providers`
pub async fn get_providers(State(state): State<AppState>) -> ApiResult<Json<ProviderList>> {
    let conn = state.db.lock().await;
    Ok(Json(queries::list_providers(&conn)?))
}

// ── Collections ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CollectionsResponse {
    pub collections: Vec<CollectionSummary>,
}

/// `GET /api/collections`
pub async fn get_collections(State(state): State<AppState>) -> ApiResult<Json<CollectionsResponse>> {
    let conn = state.db.lock().await;
    Ok(Json(CollectionsResponse {
        collections: queries::collections_with_counts(&conn)?,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CollectionBody {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// `POST /api/collections`
pub async fn create_collection(
    State(state): State<AppState>,
    Json(body): Json<CollectionBody>,
) -> ApiResult<(StatusCode, Json<Collection>)> {
    let conn = state.db.lock().await;
    let created = operations::create_collection(
        &conn,
        body.name.as_deref().unwrap_or(""),
        body.description.as_deref().unwrap_or(""),
    )?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Serialize)]
pub struct UpdateCollectionResponse {
    #[serde(flatten)]
    pub collection: Collection,
    pub changed: bool,
}

/// `PUT /api/collections/{id}`
pub async fn update_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<CollectionBody>,
) -> ApiResult<Json<UpdateCollectionResponse>> {
    let conn = state.db.lock().await;
    let collection = operations::update_collection(
        &conn,
        id,
        body.name.as_deref().unwrap_or(""),
        body.description.as_deref().unwrap_or(""),
    )?;
    Ok(Json(UpdateCollectionResponse {
        collection,
        changed: true,
    }))
}

#[derive(Debug, Serialize)]
pub struct DeleteCollectionResponse {
    pub id: i64,
    pub deleted: bool,
}

/// `DELETE /api/collections/{id}`
pub async fn delete_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteCollectionResponse>> {
    let conn = state.db.lock().await;
    operations::delete_collection(&conn, id)?;
    Ok(Json(DeleteCollectionResponse { id, deleted: true }))
}

// ── Collection Games ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CollectionGamesResponse {
    pub games: Vec<Game>,
}

/// `GET /api/collections/{id}/games`
pub async fn get_collection_games(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CollectionGamesResponse>> {
    let conn = state.db.lock().await;
    Ok(Json(CollectionGamesResponse {
        games: queries::collection_games(&conn, id)?,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AddGameBody {
    #[serde(rename = "gameId")]
    pub game_id: Option<i64>,
}

/// `POST /api/collections/{id}/games`
pub async fn add_game(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AddGameBody>,
) -> ApiResult<(StatusCode, Json<MembershipAdded>)> {
    let game_id = body
        .game_id
        .ok_or_else(|| ApiError::bad_request("Game ID is required"))?;
    let conn = state.db.lock().await;
    let added = operations::add_game_to_collection(&conn, id, game_id)?;
    Ok((StatusCode::CREATED, Json(added)))
}

/// `DELETE /api/collections/{collection_id}/games/{game_id}`
pub async fn remove_game(
    State(state): State<AppState>,
    Path((collection_id, game_id)): Path<(i64, i64)>,
) -> ApiResult<Json<MembershipRemoved>> {
    let conn = state.db.lock().await;
    Ok(Json(operations::remove_game_from_collection(
        &conn,
        collection_id,
        game_id,
    )?))
}

#[derive(Debug, Serialize)]
pub struct MembershipCheckResponse {
    #[serde(rename = "inCollection")]
    pub in_collection: bool,
}

/// `GET /api/collections/{collection_id}/games/{game_id}`
pub async fn check_membership(
    State(state): State<AppState>,
    Path((collection_id, game_id)): Path<(i64, i64)>,
) -> ApiResult<Json<MembershipCheckResponse>> {
    let conn = state.db.lock().await;
    Ok(Json(MembershipCheckResponse {
        in_collection: queries::is_in_collection(&conn, collection_id, game_id)?,
    }))
}

/// Fallback for unknown `/api` paths.
pub async fn api_not_found() -> ApiError {
    ApiError::not_found("Not found")
}
