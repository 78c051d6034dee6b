//! Local JSON document store.
//!
//! Layout under the data directory:
//! ```text
//! data_dir/
//! ├── plant_lists.json        # JSON array of every List
//! └── plant_collections.json  # JSON array of every Collection
//! ```
//! Both arrays are read on every operation and each one the operation
//! changed is rewritten whole. A missing file reads as an empty array.

use std::path::{Path, PathBuf};

use plants_models::{AppData, Collection, List};
use tracing::info;

use crate::atomic::{atomic_write_json, ensure_dir, read_json_optional};
use crate::document::{DocumentBackend, DocumentStore};
use crate::error::Result;

/// File name of the lists array.
pub const LISTS_FILE: &str = "plant_lists.json";

/// File name of the collections array.
pub const COLLECTIONS_FILE: &str = "plant_collections.json";

/// The two JSON files backing a [`JsonStore`].
pub struct JsonFiles {
    dir: PathBuf,
}

impl JsonFiles {
    fn lists_path(&self) -> PathBuf {
        self.dir.join(LISTS_FILE)
    }

    fn collections_path(&self) -> PathBuf {
        self.dir.join(COLLECTIONS_FILE)
    }
}

impl DocumentBackend for JsonFiles {
    fn name(&self) -> &'static str {
        "json"
    }

    fn load(&self) -> Result<AppData> {
        let lists: Vec<List> = read_json_optional(&self.lists_path())?.unwrap_or_default();
        let collections: Vec<Collection> =
            read_json_optional(&self.collections_path())?.unwrap_or_default();
        Ok(AppData { lists, collections })
    }

    fn save_lists(&self, lists: &[List]) -> Result<()> {
        atomic_write_json(&self.lists_path(), &lists)
    }

    fn save_collections(&self, collections: &[Collection]) -> Result<()> {
        atomic_write_json(&self.collections_path(), &collections)
    }
}

pub type JsonStore = DocumentStore<JsonFiles>;

impl JsonStore {
    /// Opens (creating if needed) the store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        info!(dir = %dir.display(), "opened json store");
        Ok(Self::with_backend(JsonFiles { dir }))
    }

    pub fn dir(&self) -> &Path {
        &self.backend_ref().dir
    }
}
