//! List handlers.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use plants_models::{ItemId, List, ListId, ListItem};

use crate::error::Result;
use crate::handlers::require;
use crate::state::AppState;
use crate::types::{AddItemRequest, ApplyRequest, CreateListRequest, UpdateTitleRequest};

/// GET /lists - All lists, newest first.
pub async fn list_lists(State(state): State<AppState>) -> Result<Json<Vec<List>>> {
    Ok(Json(state.service.get_lists()?))
}

/// POST /lists - Create a list; the body and its title are optional.
pub async fn create_list(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<List>)> {
    let req: CreateListRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateListRequest::default()
    } else {
        serde_json::from_slice(&body)?
    };
    let list = state.service.create_list(req.title.as_deref())?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// GET /lists/:id - One list with ordered items.
pub async fn get_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<List>> {
    Ok(Json(state.service.get_list(&ListId::from(id))?))
}

/// PATCH /lists/:id - Rename a list.
pub async fn update_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateTitleRequest>, JsonRejection>,
) -> Result<Json<List>> {
    let Json(req) = payload?;
    let title = require(req.title, "title")?;
    Ok(Json(
        state.service.update_list_title(&ListId::from(id), &title)?,
    ))
}

/// DELETE /lists/:id - Delete a list and its items.
pub async fn delete_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.service.delete_list(&ListId::from(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /lists/:id/items - Items of a list in position order.
pub async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ListItem>>> {
    Ok(Json(state.service.list_items(&ListId::from(id))?))
}

/// POST /lists/:id/items - Append one item.
pub async fn add_list_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ListItem>)> {
    let Json(req) = payload?;
    let content = require(req.content, "content")?;
    let item = state.service.add_list_item(&ListId::from(id), &content)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// POST /lists/:id/apply - Insert a collection's items, or the text itself.
pub async fn apply_to_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ApplyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<ListItem>>)> {
    let Json(req) = payload?;
    let text = require(req.text, "text")?;
    let applied = state
        .service
        .apply_collection_to_list(&ListId::from(id), &text)?;
    Ok((StatusCode::CREATED, Json(applied.items)))
}

/// DELETE /lists/:id/items/:item_id - Remove one item.
pub async fn delete_list_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    state
        .service
        .delete_list_item(&ListId::from(id), &ItemId::from(item_id))?;
    Ok(StatusCode::NO_CONTENT)
}
