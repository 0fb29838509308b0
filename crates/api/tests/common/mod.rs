#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use blitz_api::config::ServerConfig;
use blitz_api::router::build_app_router;
use blitz_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        pool_page_size: 100,
        layout_cache_capacity: 500,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a target and return its id.
pub async fn create_target(pool: &PgPool, handle: &str, location: Option<&str>) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/targets",
        serde_json::json!({"handle": handle, "location": location}),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a campaign day for `date` and return its id.
pub async fn create_campaign_day(pool: &PgPool, date: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/campaign-days",
        serde_json::json!({"campaign_date": date}),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Assign a target and return the assignment JSON.
pub async fn assign(pool: &PgPool, day_id: i64, target_id: i64, wave: i64) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/campaign-days/{day_id}/assignments"),
        serde_json::json!({"target_id": target_id, "wave_number": wave}),
    )
    .await;
    body_json(response).await["data"].clone()
}
