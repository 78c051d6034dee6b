//! Response DTOs for the API. Entities are returned as-is; only the health
//! check has its own shape.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Storage backend in use.
    pub backend: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}
