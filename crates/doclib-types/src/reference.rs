use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque string that locates a stored blob and identifies its record.
///
/// The blob store hands these out (e.g. `/uploads/1718000000000-a.pdf`) and
/// the registry uses them as the only lookup key. There is no separate
/// numeric ID.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileReference(String);

impl FileReference {
    /// Wrap a reference string without validation.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse a caller-supplied reference, rejecting blank input.
    pub fn parse(value: &str) -> Result<Self, TypeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TypeError::EmptyField {
                field: "fileReference",
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The last `/`-separated segment, i.e. the stored file name.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Debug for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileReference({})", self.0)
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileReference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FileReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}
