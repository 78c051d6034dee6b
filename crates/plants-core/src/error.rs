//! Error taxonomy surfaced by the domain service.

use plants_persistence::PersistenceError;
use thiserror::Error;

/// Errors returned by [`crate::PlantService`].
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A list, collection or item id does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A required field was missing or blank.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No persistence backend could be reached.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Any other storage failure.
    #[error("storage error: {0}")]
    Storage(#[source] PersistenceError),
}

impl From<PersistenceError> for ServiceError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { .. } => ServiceError::NotFound(err.to_string()),
            err if err.is_unavailable() => ServiceError::StorageUnavailable(err.to_string()),
            err => ServiceError::Storage(err),
        }
    }
}

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
