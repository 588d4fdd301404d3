use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use doclib_types::FileReference;

use crate::error::{StoreError, StoreResult};

/// URL prefix under which stored blobs are served.
pub const DEFAULT_URL_PREFIX: &str = "/uploads";

/// Accepted upload extension (compared case-insensitively).
pub const ACCEPTED_EXTENSION: &str = "pdf";

/// How many successive millisecond stamps a save will try before giving up.
pub(crate) const MAX_NAME_ATTEMPTS: u32 = 1024;

/// Maps stored file names to references and back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceScheme {
    prefix: String,
}

impl ReferenceScheme {
    /// Build a scheme for the given URL prefix. Leading and trailing slashes
    /// are normalized, so `uploads/` and `/uploads` are equivalent.
    pub fn new(prefix: &str) -> Self {
        let trimmed = prefix.trim().trim_matches('/');
        let prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self { prefix }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The reference for a stored file name.
    pub fn reference(&self, stored_name: &str) -> FileReference {
        FileReference::new(format!("{}/{stored_name}", self.prefix))
    }

    /// Recover the stored file name from a reference.
    ///
    /// Fails if the reference is outside this prefix or would escape the
    /// store's root directory.
    pub fn stored_name(&self, reference: &FileReference) -> StoreResult<String> {
        let invalid = || StoreError::InvalidReference(reference.to_string());
        let rest = reference
            .as_str()
            .strip_prefix(&self.prefix)
            .and_then(|r| r.strip_prefix('/'))
            .ok_or_else(invalid)?;
        if rest.is_empty()
            || rest == "."
            || rest == ".."
            || rest.contains('/')
            || rest.contains('\\')
        {
            return Err(invalid());
        }
        Ok(rest.to_string())
    }
}

impl Default for ReferenceScheme {
    fn default() -> Self {
        Self::new(DEFAULT_URL_PREFIX)
    }
}

/// Reduce an uploaded file name to its final path component and check the
/// extension.
pub fn sanitize_original_name(original: &str) -> StoreResult<String> {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        return Err(StoreError::InvalidName(original.to_string()));
    }
    let accepted = Path::new(base)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION))
        .unwrap_or(false);
    if !accepted {
        return Err(StoreError::UnsupportedExtension(base.to_string()));
    }
    Ok(base.to_string())
}

/// `<millis>-<original>`.
pub fn stored_name(millis: u128, original: &str) -> String {
    format!("{millis}-{original}")
}

pub(crate) fn unix_millis_now() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(ReferenceScheme::new("uploads/").prefix(), "/uploads");
        assert_eq!(ReferenceScheme::new("/files").prefix(), "/files");
        assert_eq!(ReferenceScheme::new("/").prefix(), "");
    }

    #[test]
    fn reference_and_back() {
        let scheme = ReferenceScheme::default();
        let r = scheme.reference("1718-a.pdf");
        assert_eq!(r.as_str(), "/uploads/1718-a.pdf");
        assert_eq!(scheme.stored_name(&r).unwrap(), "1718-a.pdf");
    }

    #[test]
    fn rejects_foreign_and_escaping_references() {
        let scheme = ReferenceScheme::default();
        for bad in [
            "/other/1-a.pdf",
            "/uploads/",
            "/uploads/..",
            "/uploads/sub/1-a.pdf",
            "/uploads/..\\secret.pdf",
            "/uploadsx/1-a.pdf",
        ] {
            let err = scheme.stored_name(&FileReference::new(bad)).unwrap_err();
            assert!(matches!(err, StoreError::InvalidReference(_)), "{bad}");
        }
    }

    #[test]
    fn sanitize_keeps_final_component() {
        assert_eq!(sanitize_original_name("a.pdf").unwrap(), "a.pdf");
        assert_eq!(sanitize_original_name("../../etc/x.PDF").unwrap(), "x.PDF");
        assert_eq!(sanitize_original_name("C:\\docs\\m.pdf").unwrap(), "m.pdf");
    }

    #[test]
    fn sanitize_rejects_non_pdf() {
        assert!(matches!(
            sanitize_original_name("notes.txt"),
            Err(StoreError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            sanitize_original_name("pdf"),
            Err(StoreError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn sanitize_rejects_empty() {
        assert!(matches!(sanitize_original_name(""), Err(StoreError::InvalidName(_))));
        assert!(matches!(sanitize_original_name("dir/"), Err(StoreError::InvalidName(_))));
    }

    #[test]
    fn stored_name_format() {
        assert_eq!(stored_name(1718000000000, "a.pdf"), "1718000000000-a.pdf");
    }
}
