//! Advisory content checks for uploads.
//!
//! The file extension decides whether an upload is accepted. These checks
//! only report a mismatch so the caller can log it.

const PDF_MIME: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Describe why an upload does not look like a PDF, or `None` if it does.
pub fn pdf_mismatch(content_type: Option<&str>, content: &[u8]) -> Option<String> {
    if let Some(declared) = content_type {
        let essence = declared.split(';').next().unwrap_or_default().trim();
        if !essence.eq_ignore_ascii_case(PDF_MIME) {
            return Some(format!("declared content type {essence:?}"));
        }
    }
    if !content.starts_with(PDF_MAGIC) {
        return Some("missing %PDF- header".to_string());
    }
    None
}
