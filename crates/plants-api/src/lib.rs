//! REST API for 30Plants.
//!
//! Exposes the domain service over HTTP:
//! - Lists: list, create, get, rename, delete, items, apply a collection
//! - Collections: list/suggest, create, get, rename, items
//! - Whole-dataset export and import
//!
//! Success bodies are the entity JSON itself; failures are `{"error": "..."}`.
//!
//! # Example
//!
//! ```ignore
//! use plants_api::{ApiConfig, AppState, serve};
//! use plants_core::PlantService;
//! use plants_persistence::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = PlantService::new(Arc::new(MemoryStore::new()));
//!     let config = ApiConfig::default();
//!     serve(config.clone(), AppState::new(config, service)).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
