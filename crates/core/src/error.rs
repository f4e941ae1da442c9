use crate::types::DbId;

/// Domain error taxonomy shared by every layer.
///
/// `NotFound` deliberately covers rows owned by another user: a caller
/// must not be able to distinguish "absent" from "foreign".
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A write that would break a structural invariant: milestone cycle,
    /// cross-project reference, end-before-start time range.
    #[error("Invariant violation: {0}")]
    Invariant(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
