//! Locations and backend selection for 30Plants.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.30plants/
//! ├── .env        # optional environment overrides
//! ├── data/       # JSON backend: plant_lists.json, plant_collections.json
//! └── plants.db   # SQLite backend
//! ```
//!
//! # Environment Variables
//!
//! - `PLANTS_STATE_DIR`: Override the base state directory
//! - `PLANTS_BACKEND`: `json` (default), `sqlite` or `memory`
//! - `PLANTS_DATA_DIR`: Override the JSON data directory
//! - `PLANTS_DB_PATH`: Override the SQLite database file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use plants_persistence::{Backend, PersistenceError, StoreConfig};

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "PLANTS_STATE_DIR";

/// Environment variable selecting the storage backend.
pub const BACKEND_ENV: &str = "PLANTS_BACKEND";

/// Environment variable for the JSON data directory.
pub const DATA_DIR_ENV: &str = "PLANTS_DATA_DIR";

/// Environment variable for the SQLite database path.
pub const DB_PATH_ENV: &str = "PLANTS_DB_PATH";

const DEFAULT_STATE_DIR: &str = ".30plants";
const DATA_SUBDIR: &str = "data";
const DB_FILE: &str = "plants.db";
const ENV_FILE: &str = ".env";

/// Get the state directory.
///
/// 1. `PLANTS_STATE_DIR` if set
/// 2. `~/.30plants` if a home directory is available
/// 3. `.30plants` in the current directory
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_state_dir())
}

fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_STATE_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
}

/// Path of the optional `.env` file inside `state_dir`.
pub fn env_file(state_dir: &Path) -> PathBuf {
    state_dir.join(ENV_FILE)
}

/// Backend named by `PLANTS_BACKEND`, defaulting to JSON.
pub fn backend() -> Result<Backend, PersistenceError> {
    match std::env::var(BACKEND_ENV) {
        Ok(value) if !value.trim().is_empty() => value.parse(),
        _ => Ok(Backend::default()),
    }
}

/// Store configuration rooted at `state_dir`, honoring the per-path
/// environment overrides.
pub fn store_config(state_dir: &Path, backend: Backend) -> StoreConfig {
    StoreConfig {
        backend,
        data_dir: std::env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| state_dir.join(DATA_SUBDIR)),
        db_path: std::env::var(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| state_dir.join(DB_FILE)),
    }
}

/// Creates `state_dir` if it does not exist.
pub fn ensure_state_dir(state_dir: &Path) -> io::Result<()> {
    if !state_dir.exists() {
        fs::create_dir_all(state_dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_state_dir_name() {
        assert!(default_state_dir().ends_with(DEFAULT_STATE_DIR));
    }

    #[test]
    fn test_env_file_location() {
        assert_eq!(
            env_file(Path::new("/tmp/plants")),
            PathBuf::from("/tmp/plants/.env")
        );
    }

    #[test]
    fn test_store_config_paths() {
        if std::env::var(DATA_DIR_ENV).is_ok() || std::env::var(DB_PATH_ENV).is_ok() {
            return;
        }
        let config = store_config(Path::new("/tmp/plants"), Backend::Sqlite);
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/plants/data"));
        assert_eq!(config.db_path, PathBuf::from("/tmp/plants/plants.db"));
    }

    #[test]
    fn test_ensure_state_dir() {
        let dir = tempdir().unwrap();
        let state = dir.path().join("nested/state");
        ensure_state_dir(&state).unwrap();
        assert!(state.is_dir());
    }
}
