use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A resource keyed by something other than a row id (e.g. the caller's
    /// active board) does not exist.
    #[error("Not found: {0}")]
    Missing(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The player's ledger cannot cover the requested spend.
    #[error("Insufficient {resource}: need {needed}, have {available}")]
    InsufficientFunds {
        resource: &'static str,
        needed: i64,
        available: i64,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
