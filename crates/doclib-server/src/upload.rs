//! `POST /upload`: multipart form with the PDF, a name, and a category.
//!
//! Field parsing lives here; the blob-then-record ordering is
//! [`AppState::upload_document`](crate::state::AppState::upload_document).

use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use doclib_store::pdf_mismatch;
use doclib_types::{Category, DocumentRecord};
use tracing::{debug, warn};

use crate::api::FILE_FIELDS;
use crate::error::{ServerError, ServerResult};
use crate::state::{AppState, blocking};

#[derive(Debug)]
struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

#[derive(Debug, Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    name: Option<String>,
    category: Option<String>,
}

impl UploadForm {
    async fn read(multipart: &mut Multipart) -> ServerResult<Self> {
        let invalid = |e: MultipartError| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ServerError::PayloadTooLarge(e.body_text())
            } else {
                ServerError::Validation(format!("malformed multipart body: {}", e.body_text()))
            }
        };
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(invalid)? {
            let field_name = field.name().unwrap_or_default().to_string();
            match field_name.as_str() {
                name if FILE_FIELDS.contains(&name) => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(invalid)?;
                    form.file = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                "name" => form.name = Some(field.text().await.map_err(invalid)?),
                "category" => form.category = Some(field.text().await.map_err(invalid)?),
                other => debug!(field = other, "ignoring unknown upload field"),
            }
        }
        Ok(form)
    }

    fn validate(self) -> ServerResult<(UploadedFile, String, Category)> {
        let file = self
            .file
            .filter(|f| !f.file_name.trim().is_empty())
            .ok_or_else(|| ServerError::Validation("missing file".into()))?;
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ServerError::Validation("missing field: name".into()))?;
        let category = self
            .category
            .ok_or_else(|| ServerError::Validation("missing field: category".into()))?
            .parse::<Category>()
            .map_err(|e| ServerError::Validation(e.to_string()))?;
        Ok((file, name, category))
    }
}

pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Json<DocumentRecord>> {
    let mut multipart = multipart.map_err(|e| ServerError::Validation(e.body_text()))?;
    let (file, name, category) = UploadForm::read(&mut multipart).await?.validate()?;

    if let Some(reason) = pdf_mismatch(file.content_type.as_deref(), &file.bytes) {
        warn!(file_name = %file.file_name, %reason, "upload does not look like a PDF");
    }

    let record = blocking(move || {
        state.upload_document(&file.bytes, &file.file_name, &name, category)
    })
    .await?;

    Ok(Json(record))
}
