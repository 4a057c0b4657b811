use topicvault_core::error::CoreError;
use topicvault_db::StoreError;

/// Errors surfaced by the hierarchy engine and the secure facade.
///
/// Domain errors and store failures pass through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
