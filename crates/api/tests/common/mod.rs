#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use promo_core::store::MemoryPromotionStore;
use serde_json::{json, Value};
use tower::ServiceExt;

use promo_api::config::ServerConfig;
use promo_api::router::build_app_router;
use promo_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Serves the browser form from the workspace `static/` directory and keeps
/// promotions in memory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../../static").to_string(),
        database_url: None,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app() -> Router {
    let state = AppState {
        store: Arc::new(MemoryPromotionStore::new()),
    };
    build_app_router(state, &test_config())
}

/// The payload used throughout the API tests.
pub fn new_year_sale() -> Value {
    json!({
        "title": "New Year Sale",
        "description": "Save big on everything",
        "promo_code": 10001,
        "promo_type": "AMOUNT_DISCOUNT",
        "promo_value": "50%",
        "start_date": "2025-01-01",
        "created_date": "2024-12-25",
        "duration": "30 days",
        "active": true,
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a raw body with an arbitrary `Content-Type`.
pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a promotion from `body` and return the stored record.
pub async fn create(app: &Router, body: Value) -> Value {
    let response = post_json(app.clone(), "/promotions", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
