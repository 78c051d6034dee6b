//! Application state shared across handlers.

use std::sync::Arc;

use plants_core::PlantService;

use crate::config::ApiConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Domain service over the configured store.
    pub service: PlantService,
}

impl AppState {
    pub fn new(config: ApiConfig, service: PlantService) -> Self {
        Self {
            config: Arc::new(config),
            service,
        }
    }
}
