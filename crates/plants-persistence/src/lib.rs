//! Persistence layer for 30Plants.
//!
//! One [`Store`] contract with three implementations:
//! - [`JsonStore`]: two whole-file JSON arrays in a directory, written atomically
//! - [`SqliteStore`]: a relational schema with integer row ids
//! - [`MemoryStore`]: an in-process fake for tests
//!
//! # Example
//!
//! ```no_run
//! use plants_persistence::{open_store, Backend, StoreConfig};
//!
//! let config = StoreConfig {
//!     backend: Backend::Json,
//!     data_dir: "/home/user/.30plants/data".into(),
//!     db_path: "/home/user/.30plants/plants.db".into(),
//! };
//! let store = open_store(&config).unwrap();
//! let list = store.create_list("2024 W03 January 15-21").unwrap();
//! assert!(list.items.is_empty());
//! ```

pub mod atomic;
pub mod backend;
pub mod document;
pub mod error;
pub mod json_store;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use backend::{open_store, Backend, StoreConfig};
pub use document::{DocumentBackend, DocumentStore};
pub use error::{PersistenceError, Result};
pub use json_store::JsonStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::Store;
