//! Error types for persistence operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during persistence operations.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to read from file system.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to file system.
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the storage directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize or parse a JSON document.
    #[error("failed to serialize: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Database could not be opened at all.
    #[error("failed to open database {path}: {source}")]
    OpenError {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Database query failed.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Entity not found.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Persisted data could not be interpreted.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A thread panicked while holding the store lock.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl PersistenceError {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// True when the backing store itself cannot be reached, as opposed to
    /// a single operation failing.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::DirectoryError { .. } | Self::OpenError { .. } | Self::LockPoisoned(_)
        )
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
