use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("only PDF files can be uploaded (got {0})")]
    NotPdf(String),

    #[error("upload form incomplete: {0} is missing")]
    Incomplete(&'static str),

    #[error("invalid category: {0}")]
    Category(#[from] doclib_types::TypeError),
}

pub type ViewResult<T> = Result<T, ViewError>;
