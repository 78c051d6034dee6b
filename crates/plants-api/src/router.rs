//! Router configuration and server setup.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Lists
        .route(
            "/lists",
            get(handlers::list_lists).post(handlers::create_list),
        )
        .route(
            "/lists/:id",
            get(handlers::get_list)
                .patch(handlers::update_list)
                .delete(handlers::delete_list),
        )
        .route(
            "/lists/:id/items",
            get(handlers::list_items).post(handlers::add_list_item),
        )
        .route(
            "/lists/:id/items/:item_id",
            delete(handlers::delete_list_item),
        )
        .route("/lists/:id/apply", post(handlers::apply_to_list))
        // Collections
        .route(
            "/collections",
            get(handlers::list_collections).post(handlers::create_collection),
        )
        .route(
            "/collections/:id",
            get(handlers::get_collection).patch(handlers::update_collection),
        )
        .route(
            "/collections/:id/items/:item_id",
            delete(handlers::delete_collection_item),
        )
        .route("/collection-items", post(handlers::add_collection_item))
        // Whole dataset
        .route("/export", get(handlers::export_data))
        .route("/import", post(handlers::import_data))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Starts the API server.
pub async fn serve(config: ApiConfig, state: AppState) -> Result<(), std::io::Error> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(backend = state.service.backend(), "API server listening on {}", addr);
    axum::serve(listener, create_router(state)).await
}
