//! Backend selection, done once at startup.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{PersistenceError, Result};
use crate::json_store::JsonStore;
use crate::memory::MemoryStore;
use crate::sqlite::SqliteStore;
use crate::store::Store;

/// Which storage implementation to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Two JSON array files in a directory.
    #[default]
    Json,
    /// A SQLite database file.
    Sqlite,
    /// Nothing persisted.
    Memory,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::Json => "json",
            Backend::Sqlite => "sqlite",
            Backend::Memory => "memory",
        })
    }
}

impl FromStr for Backend {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "local" => Ok(Backend::Json),
            "sqlite" | "sql" | "db" => Ok(Backend::Sqlite),
            "memory" | "mem" => Ok(Backend::Memory),
            other => Err(PersistenceError::InvalidData(format!(
                "unknown storage backend: {other}"
            ))),
        }
    }
}

/// Everything needed to open a [`Store`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: Backend,
    /// Directory for the JSON backend.
    pub data_dir: PathBuf,
    /// Database file for the SQLite backend.
    pub db_path: PathBuf,
}

/// Opens the configured backend behind the common [`Store`] interface.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match config.backend {
        Backend::Json => Arc::new(JsonStore::open(&config.data_dir)?),
        Backend::Sqlite => Arc::new(SqliteStore::open(&config.db_path)?),
        Backend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}
