use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use doclib_registry::RegistryError;
use doclib_store::StoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Registry(RegistryError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Store(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Registry(RegistryError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
