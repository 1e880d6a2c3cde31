//! Route definitions for the promotion resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::promotion;
use crate::state::AppState;

/// Promotion routes mounted at `/promotions`.
///
/// ```text
/// GET    /                -> list (optionally filtered by query string)
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// PUT    /{id}/activate   -> set_active
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(promotion::list).post(promotion::create))
        .route(
            "/{id}",
            get(promotion::get_by_id)
                .put(promotion::update)
                .delete(promotion::delete),
        )
        .route("/{id}/activate", put(promotion::set_active))
}
