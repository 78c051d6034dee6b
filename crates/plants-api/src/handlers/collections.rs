//! Collection handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use plants_models::{Collection, CollectionId, CollectionItem, ItemId};

use crate::error::{ApiError, Result};
use crate::handlers::require;
use crate::state::AppState;
use crate::types::{
    AddCollectionItemRequest, CollectionQuery, CreateCollectionRequest, UpdateTitleRequest,
};

/// GET /collections - All collections, or those matching `?q=`.
pub async fn list_collections(
    State(state): State<AppState>,
    Query(query): Query<CollectionQuery>,
) -> Result<Json<Vec<Collection>>> {
    let collections = match query.q {
        Some(q) => state.service.suggest_collections(&q)?,
        None => state.service.get_collections()?,
    };
    Ok(Json(collections))
}

/// POST /collections - Create a collection.
pub async fn create_collection(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateCollectionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Collection>)> {
    let Json(req) = payload?;
    let title = require(req.title, "title")?;
    let collection = state.service.create_collection(&title)?;
    Ok((StatusCode::CREATED, Json(collection)))
}

/// GET /collections/:id
pub async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Collection>> {
    Ok(Json(
        state.service.get_collection(&CollectionId::from(id))?,
    ))
}

/// PATCH /collections/:id - Rename a collection.
pub async fn update_collection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateTitleRequest>, JsonRejection>,
) -> Result<Json<Collection>> {
    let Json(req) = payload?;
    let title = require(req.title, "title")?;
    Ok(Json(
        state
            .service
            .update_collection_title(&CollectionId::from(id), &title)?,
    ))
}

/// POST /collection-items - Append an item to a collection.
pub async fn add_collection_item(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AddCollectionItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CollectionItem>)> {
    let Json(req) = payload?;
    let content = require(req.content, "content")?;
    let collection_id = req
        .collection_id
        .map(|id| id.into_string())
        .ok_or_else(|| ApiError::BadRequest("collectionId is required".to_string()))?;
    let item = state
        .service
        .add_collection_item(&CollectionId::from(collection_id), &content)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /collections/:id/items/:item_id
pub async fn delete_collection_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    state
        .service
        .delete_collection_item(&CollectionId::from(id), &ItemId::from(item_id))?;
    Ok(StatusCode::NO_CONTENT)
}
