use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::reference::FileReference;
use crate::temporal::Timestamp;

/// One uploaded document.
///
/// Serialized with camelCase keys. Records written by older front ends used
/// `fileUrl` for the reference and carried no timestamps; both shapes still
/// deserialize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub name: String,
    pub category: Category,
    #[serde(alias = "fileUrl")]
    pub file_reference: FileReference,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl DocumentRecord {
    /// A freshly created record: `updated_at` starts equal to `created_at`.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        file_reference: FileReference,
        created_at: Timestamp,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            file_reference,
            updated_at: created_at.clone(),
            created_at,
        }
    }

    /// Replace the display name and refresh `updated_at`.
    pub fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
        self.updated_at = Timestamp::after(&self.updated_at);
    }
}
