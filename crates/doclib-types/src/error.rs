use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}
