//! Whole-dataset export and import.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use plants_models::AppData;

use crate::error::Result;
use crate::state::AppState;

/// GET /export - Every list and collection.
pub async fn export_data(State(state): State<AppState>) -> Result<Json<AppData>> {
    Ok(Json(state.service.export_data()?))
}

/// POST /import - Replace everything with the posted snapshot.
pub async fn import_data(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AppData>, JsonRejection>,
) -> Result<StatusCode> {
    let Json(data) = payload?;
    state.service.import_data(data)?;
    Ok(StatusCode::NO_CONTENT)
}
