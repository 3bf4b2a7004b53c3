//! Integration tests for the API routes against an in-memory catalog.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use gamedex_server::routes::api_router;
use gamedex_server::state::AppState;
use http_body_util::BodyExt;
use rusqlite::params;
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_app() -> Router {
    let conn = gamedex_db::open_memory().unwrap();
    for (url, title, provider, image) in [
        ("a", "Alpha", "P1", "i1"),
        ("b", "Beta", "P2", "i2"),
        ("c", "Gamma", "P1", "i3"),
    ] {
        conn.execute(
            "INSERT INTO games (url, title, provider, image_path) VALUES (?1, ?2, ?3, ?4)",
            params![url, title, provider, image],
        )
        .unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO providers (name) VALUES (?1)",
            params![provider],
        )
        .unwrap();
    }

    Router::new()
        .nest("/api", api_router())
        .with_state(AppState::new(conn))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn games_listing_returns_page_and_metadata() {
    let app = test_app();
    let response = app.oneshot(get("/api/games?sort=asc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["games"].as_array().unwrap().len(), 3);
    assert_eq!(body["games"][0]["title"], "Alpha");
    assert_eq!(body["metadata"]["totalGames"], 3);
    assert_eq!(body["metadata"]["totalPages"], 1);
    assert_eq!(body["metadata"]["currentPage"], 1);
    assert_eq!(body["metadata"]["gamesPerPage"], 60);
}

#[tokio::test]
async fn games_listing_applies_search_and_provider_filters() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(get("/api/games?search=alp"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["games"].as_array().unwrap().len(), 1);
    assert_eq!(body["games"][0]["title"], "Alpha");
    assert_eq!(body["metadata"]["totalGames"], 1);

    let response = app
        .oneshot(get("/api/games?provider=P2&sort=asc"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["games"].as_array().unwrap().len(), 1);
    assert_eq!(body["games"][0]["title"], "Beta");
}

#[tokio::test]
async fn games_by_ids_uses_the_flat_metadata_shape() {
    let app = test_app();
    let response = app.oneshot(get("/api/games?ids=1,3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["games"].as_array().unwrap().len(), 2);
    assert_eq!(body["metadata"], json!({ "total": 2 }));
}

#[tokio::test]
async fn providers_include_the_all_sentinel() {
    let app = test_app();
    let response = app.oneshot(get("/api/providers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["providers"], json!(["All", "P1", "P2"]));
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn collection_crud_round_trip() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/collections",
            &json!({ "name": "Picks", "description": "the good ones" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Picks");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/collections/{id}"),
            &json!({ "name": "Renamed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["name"], "Renamed");
    assert_eq!(updated["changed"], true);

    let response = app.clone().oneshot(get("/api/collections")).await.unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed["collections"][0]["name"], "Renamed");
    assert_eq!(listed["collections"][0]["game_count"], 0);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/collections/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted = body_json(response).await;
    assert_eq!(deleted["deleted"], true);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/collections/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_collection_name_is_a_400() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/collections",
            &json!({ "name": "  " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request("POST", "/api/collections", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn updating_a_missing_collection_is_a_404() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/collections/999",
            &json!({ "name": "Ghost" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn membership_flow_is_idempotent_and_checkable() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/collections",
            &json!({ "name": "Picks" }),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_i64().unwrap();

    let add = |game_id: i64| {
        json_request(
            "POST",
            &format!("/api/collections/{id}/games"),
            &json!({ "gameId": game_id }),
        )
    };

    let response = app.clone().oneshot(add(1)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["added"], true);

    let response = app.clone().oneshot(add(1)).await.unwrap();
    assert_eq!(body_json(response).await["added"], false);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/collections/{id}/games/1")))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["inCollection"], true);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/collections/{id}/games")))
        .await
        .unwrap();
    let games = body_json(response).await;
    assert_eq!(games["games"].as_array().unwrap().len(), 1);
    assert_eq!(games["games"][0]["title"], "Alpha");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/collections/{id}/games/1"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(response).await["removed"], true);

    let response = app
        .oneshot(get(&format!("/api/collections/{id}/games/1")))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["inCollection"], false);
}

#[tokio::test]
async fn missing_game_id_is_a_400() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/collections",
            &json!({ "name": "Picks" }),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/collections/{id}/games"),
            &json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Game ID is required");
}

#[tokio::test]
async fn unknown_api_path_is_a_404() {
    let app = test_app();
    let response = app.oneshot(get("/api/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
