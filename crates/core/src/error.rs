use crate::types::DbId;

/// A payload or search criterion that cannot become part of a promotion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required key is absent (or `null`) in the payload.
    #[error("Invalid Promotion: missing {0}")]
    MissingField(&'static str),

    /// A value is present but cannot be coerced to the field's type.
    #[error("Invalid Promotion: {field} {reason}")]
    InvalidType { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidType {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Internal error: {0}")]
    Internal(String),
}
