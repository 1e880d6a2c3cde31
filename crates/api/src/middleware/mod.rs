//! Request extractors shared by handlers.
//!
//! - [`json_body::JsonObject`] -- A JSON object body with content-type enforcement.
//! - [`path_id::PromotionId`] -- The `{id}` path segment, 404 when not an integer.

pub mod json_body;
pub mod path_id;
