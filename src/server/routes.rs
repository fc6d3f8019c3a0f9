// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    add_files_handler, ask_handler, create_index_handler, delete_files_handler,
    delete_index_handler, embed_index_handler, health_handler, index_details_handler,
    list_indexes_handler, metrics_handler, rename_index_handler, restore_index_handler,
};
use super::middleware::{request_id_layers, track_requests};
use crate::config::AppConfig;
use crate::cosmos::IndexApi;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: Arc<dyn IndexApi>,
}

pub fn create_router(config: AppConfig, client: Arc<dyn IndexApi>) -> Router {
    let body_limit = config.server.max_upload_bytes;
    let state = AppState {
        config: Arc::new(config),
        client,
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/files/index/list", get(list_indexes_handler))
        .route("/files/index/create", post(create_index_handler))
        .route("/files/index/:index_uuid/details", get(index_details_handler))
        .route("/files/index/:index_uuid/ask", post(ask_handler))
        .route("/files/index/:index_uuid/embed", post(embed_index_handler))
        .route("/files/index/:index_uuid/add_files", post(add_files_handler))
        .route("/files/index/:index_uuid/delete_files", delete(delete_files_handler))
        .route("/files/index/:index_uuid/delete", delete(delete_index_handler))
        .route("/files/index/:index_uuid/restore", put(restore_index_handler))
        .route("/files/index/:index_uuid/rename", put(rename_index_handler))
        // Uploads are buffered in memory, so both extractor and stream limits apply
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
