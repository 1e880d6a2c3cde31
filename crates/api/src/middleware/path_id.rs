//! Promotion id path extractor.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use promo_core::service::ENTITY;
use promo_core::types::DbId;

use crate::error::AppError;

/// The `{id}` segment of a promotion route.
///
/// A segment that is not an integer cannot name a stored promotion, so it
/// is rejected as 404 with the usual JSON error body.
#[derive(Debug, Clone, Copy)]
pub struct PromotionId(pub DbId);

impl<S> FromRequestParts<S> for PromotionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        match raw.trim().parse::<DbId>() {
            Ok(id) => Ok(Self(id)),
            Err(_) => {
                tracing::info!(id = %raw, "Promotion id is not an integer");
                Err(AppError::NotFound(format!(
                    "{ENTITY} with id '{raw}' was not found."
                )))
            }
        }
    }
}
