//! `GET`, `PUT` and `DELETE /documents`.
//!
//! Handlers only translate between HTTP and the registry; all record logic
//! lives behind [`Registry`](doclib_registry::Registry).

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use doclib_types::{DocumentRecord, FileReference};

use crate::api::{RemoveRequest, RemoveResponse, RenameRequest};
use crate::error::{ServerError, ServerResult};
use crate::state::{AppState, blocking};

fn required(value: Option<String>, field: &str) -> ServerResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServerError::Validation(format!("missing field: {field}"))),
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ServerResult<T> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| ServerError::Validation(e.body_text()))
}

pub async fn list_handler(State(state): State<AppState>) -> ServerResult<Json<Vec<DocumentRecord>>> {
    let registry = state.registry.clone();
    let records = blocking(move || Ok(registry.list()?)).await?;
    Ok(Json(records))
}

pub async fn rename_handler(
    State(state): State<AppState>,
    payload: Result<Json<RenameRequest>, JsonRejection>,
) -> ServerResult<Json<DocumentRecord>> {
    let req = body(payload)?;
    let reference = FileReference::parse(&required(req.file_reference, "fileReference")?)
        .map_err(|e| ServerError::Validation(e.to_string()))?;
    let new_name = required(req.new_name, "newName")?;

    let registry = state.registry.clone();
    let record = blocking(move || Ok(registry.rename(&reference, &new_name)?)).await?;
    Ok(Json(record))
}

pub async fn remove_handler(
    State(state): State<AppState>,
    payload: Result<Json<RemoveRequest>, JsonRejection>,
) -> ServerResult<Json<RemoveResponse>> {
    let req = body(payload)?;
    let reference = FileReference::parse(&required(req.file_reference, "fileReference")?)
        .map_err(|e| ServerError::Validation(e.to_string()))?;

    let lookup = reference.clone();
    let removed = blocking(move || state.remove_document(&lookup)).await?;

    match removed {
        Some(record) => Ok(Json(RemoveResponse {
            message: "document removed".into(),
            file_reference: record.file_reference,
        })),
        None => Err(ServerError::NotFound(format!("document not found: {reference}"))),
    }
}
