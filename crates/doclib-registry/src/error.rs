//! Error types for registry operations.

use doclib_types::{FileReference, TypeError};
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required field is missing or invalid.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record carries the given reference.
    #[error("document not found: {0}")]
    NotFound(FileReference),

    /// The record file could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The record file was written by a newer version.
    #[error("unsupported record file version: {0}")]
    UnsupportedVersion(u32),

    /// I/O error reading or replacing the record file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TypeError> for RegistryError {
    fn from(err: TypeError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Convenience alias for registry results.
pub type RegistryResult<T> = Result<T, RegistryError>;
