//! Request and response bodies of the JSON endpoints.

use doclib_types::FileReference;
use serde::{Deserialize, Serialize};

/// HTTP endpoint paths.
pub mod endpoints {
    pub const UPLOAD: &str = "/upload";
    pub const DOCUMENTS: &str = "/documents";
    pub const HEALTH: &str = "/health";
}

/// Multipart field names accepted for the uploaded file.
pub const FILE_FIELDS: [&str; 2] = ["pdf", "file"];

/// `PUT /documents`.
///
/// Fields are optional so that a missing field is reported as a 400 with a
/// useful message instead of a generic deserialization rejection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    #[serde(alias = "fileUrl")]
    pub file_reference: Option<String>,
    pub new_name: Option<String>,
}

/// `DELETE /documents`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    #[serde(alias = "fileUrl")]
    pub file_reference: Option<String>,
}

/// Confirmation returned by `DELETE /documents`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveResponse {
    pub message: String,
    pub file_reference: FileReference,
}

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}
