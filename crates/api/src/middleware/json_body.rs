//! JSON object body extractor.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::{Map, Value};

use crate::error::AppError;

/// The raw field mapping of a JSON request body.
///
/// Rejects with 415 when `Content-Type` is missing or not JSON, and with 400
/// when the body is malformed or not a JSON object. Field-level validation
/// is left to the core.
#[derive(Debug, Clone)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Object(map))) => Ok(Self(map)),
            Ok(Json(_)) => Err(AppError::BadRequest(
                "Invalid Promotion: body of request contained bad or no data".into(),
            )),
            Err(JsonRejection::MissingJsonContentType(_)) => {
                tracing::error!("Invalid or missing Content-Type");
                Err(AppError::UnsupportedMediaType(
                    "Content-Type must be application/json".into(),
                ))
            }
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}
