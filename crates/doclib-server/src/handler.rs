use axum::response::Json;

use crate::api::HealthResponse;

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
