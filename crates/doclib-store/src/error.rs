/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The uploaded file name does not carry an accepted extension.
    #[error("unsupported file type: {0} (only .pdf is accepted)")]
    UnsupportedExtension(String),

    /// The uploaded file name is empty or reduces to nothing usable.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    /// The reference does not point inside this store.
    #[error("invalid blob reference: {0}")]
    InvalidReference(String),

    /// No free stored name could be found for the upload.
    #[error("could not allocate a unique name for {0}")]
    NameExhausted(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns `true` if the error was caused by the caller's input rather
    /// than by the storage backend.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedExtension(_) | Self::InvalidName(_) | Self::InvalidReference(_)
        )
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
