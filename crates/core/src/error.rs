use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Stale write on {entity} {id}: expected version {expected}, found {actual}")]
    StaleVersion {
        entity: &'static str,
        id: DbId,
        expected: i32,
        actual: i32,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
