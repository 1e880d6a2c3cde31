//! Handlers for the `/promotions` resource.
//!
//! Each handler extracts primitives from the request, calls the matching
//! operation in [`promo_core::service`] and renders the result with
//! [`Promotion::serialize`].

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use promo_core::promotion::Promotion;
use promo_core::service;
use serde_json::{Map, Value};

use crate::error::AppResult;
use crate::middleware::json_body::JsonObject;
use crate::middleware::path_id::PromotionId;
use crate::state::AppState;

type PromotionBody = Json<Map<String, Value>>;

fn render(promotions: &[Promotion]) -> Json<Vec<Map<String, Value>>> {
    Json(promotions.iter().map(Promotion::serialize).collect())
}

/// GET /promotions
///
/// Lists every promotion, or only those matching all query-string criteria
/// (`?title=&promo_code=&promo_type=&active=&...`).
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    tracing::info!(criteria = ?params, "Request for promotion list");

    let promotions = service::search(state.store.as_ref(), &params).await?;

    tracing::info!(count = promotions.len(), "Returning promotions");
    Ok(render(&promotions))
}

/// GET /promotions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PromotionId(id): PromotionId,
) -> AppResult<PromotionBody> {
    tracing::info!(id, "Request to retrieve a promotion");

    let promotion = service::retrieve(state.store.as_ref(), id).await?;
    Ok(Json(promotion.serialize()))
}

/// POST /promotions
///
/// Responds 201 with the stored record and a `Location` header.
pub async fn create(
    State(state): State<AppState>,
    JsonObject(payload): JsonObject,
) -> AppResult<impl IntoResponse> {
    tracing::info!("Request to create a new promotion");

    let promotion = service::create(state.store.as_ref(), &payload).await?;
    let location = promotion
        .id
        .map(|id| format!("/promotions/{id}"))
        .unwrap_or_default();

    tracing::info!(id = ?promotion.id, title = %promotion.title, "Promotion created");
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(promotion.serialize()),
    ))
}

/// PUT /promotions/{id}
pub async fn update(
    State(state): State<AppState>,
    PromotionId(id): PromotionId,
    JsonObject(payload): JsonObject,
) -> AppResult<PromotionBody> {
    tracing::info!(id, "Request to update a promotion");

    let promotion = service::update(state.store.as_ref(), id, &payload).await?;

    tracing::info!(id, "Promotion updated");
    Ok(Json(promotion.serialize()))
}

/// PUT /promotions/{id}/activate
///
/// Body: `{"active": true|false}`. Only the active flag changes.
pub async fn set_active(
    State(state): State<AppState>,
    PromotionId(id): PromotionId,
    JsonObject(payload): JsonObject,
) -> AppResult<PromotionBody> {
    tracing::info!(id, "Request to change promotion active status");

    let promotion = service::set_active(state.store.as_ref(), id, &payload).await?;

    tracing::info!(id, active = promotion.active, "Promotion active status updated");
    Ok(Json(promotion.serialize()))
}

/// DELETE /promotions/{id}
///
/// Always 204, whether or not the promotion existed.
pub async fn delete(
    State(state): State<AppState>,
    PromotionId(id): PromotionId,
) -> AppResult<StatusCode> {
    tracing::info!(id, "Request to delete a promotion");

    service::delete(state.store.as_ref(), id).await?;

    tracing::info!(id, "Promotion delete complete");
    Ok(StatusCode::NO_CONTENT)
}
