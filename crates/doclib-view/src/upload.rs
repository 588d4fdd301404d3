use doclib_types::Category;

use crate::error::{ViewError, ViewResult};

const PDF_MIME: &str = "application/pdf";

/// A file picked in the upload dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedFile {
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

/// State of the upload dialog before submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadDraft {
    file: Option<PickedFile>,
    name: String,
    category: Option<Category>,
}

impl UploadDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a picked or dropped file. Anything not declared as
    /// `application/pdf` is refused and the previous pick is kept.
    pub fn pick_file(&mut self, file: PickedFile) -> ViewResult<()> {
        if !file.mime_type.eq_ignore_ascii_case(PDF_MIME) {
            return Err(ViewError::NotPdf(file.mime_type));
        }
        self.file = Some(file);
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_category(&mut self, category: &str) -> ViewResult<()> {
        self.category = Some(category.parse()?);
        Ok(())
    }

    pub fn file(&self) -> Option<&PickedFile> {
        self.file.as_ref()
    }

    /// The fields to submit, once file, name and category are all present.
    pub fn ready(&self) -> ViewResult<(&PickedFile, &str, Category)> {
        let file = self.file.as_ref().ok_or(ViewError::Incomplete("file"))?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ViewError::Incomplete("name"));
        }
        let category = self.category.ok_or(ViewError::Incomplete("category"))?;
        Ok((file, name, category))
    }

    /// Clear the dialog (after a confirmed upload or on close).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
