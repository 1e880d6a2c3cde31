//! Service index: what this API is and where its operations live.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / -- service name, version and a map of the promotion endpoints.
async fn index() -> Json<Value> {
    tracing::info!("Request for root URL");

    Json(json!({
        "name": "Promotion REST API Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "This is a RESTful service for managing e-commerce promotions. \
                        You can list, view, create, update, and delete promotions.",
        "paths": {
            "list_promotions": { "method": "GET", "url": "/promotions" },
            "get_promotion": { "method": "GET", "url": "/promotions/{id}" },
            "create_promotion": { "method": "POST", "url": "/promotions" },
            "update_promotion": { "method": "PUT", "url": "/promotions/{id}" },
            "delete_promotion": { "method": "DELETE", "url": "/promotions/{id}" },
            "activate_promotion": { "method": "PUT", "url": "/promotions/{id}/activate" },
            "ui": { "method": "GET", "url": "/ui/" },
        },
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
