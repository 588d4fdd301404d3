use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::state::AppState;
use crate::{documents, handler, upload};

/// Default request body cap when the router is built without a config.
pub const DEFAULT_BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Build the axum router with the JSON API endpoints.
pub fn build_router(state: AppState) -> Router {
    build_router_with_limit(state, DEFAULT_BODY_LIMIT)
}

pub fn build_router_with_limit(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(endpoints::UPLOAD, post(upload::upload_handler))
        .route(
            endpoints::DOCUMENTS,
            get(documents::list_handler)
                .put(documents::rename_handler)
                .delete(documents::remove_handler),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
