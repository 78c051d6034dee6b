//! In-process store used by tests and throwaway sessions.

use std::sync::{RwLock, RwLockWriteGuard};

use plants_models::{AppData, Collection, List};

use crate::document::{DocumentBackend, DocumentStore};
use crate::error::{PersistenceError, Result};

/// Keeps the document in memory; nothing survives the process.
#[derive(Default)]
pub struct MemoryBackend {
    data: RwLock<AppData>,
}

impl DocumentBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> Result<AppData> {
        self.data
            .read()
            .map(|data| data.clone())
            .map_err(|e| PersistenceError::LockPoisoned(e.to_string()))
    }

    fn save_lists(&self, lists: &[List]) -> Result<()> {
        self.write()?.lists = lists.to_vec();
        Ok(())
    }

    fn save_collections(&self, collections: &[Collection]) -> Result<()> {
        self.write()?.collections = collections.to_vec();
        Ok(())
    }
}

impl MemoryBackend {
    fn write(&self) -> Result<RwLockWriteGuard<'_, AppData>> {
        self.data
            .write()
            .map_err(|e| PersistenceError::LockPoisoned(e.to_string()))
    }
}

pub type MemoryStore = DocumentStore<MemoryBackend>;

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_backend(MemoryBackend::default())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
