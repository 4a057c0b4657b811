use crate::access::Action;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Permission denied: role '{role}' may not {action} topics")]
    PermissionDenied { action: Action, role: String },

    /// An unrecognized role reached the strategy selector. This is a
    /// data-integrity bug, never a user error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
