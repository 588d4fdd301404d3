//! The [`Registry`] trait defining the document registry interface.

use doclib_types::{Category, DocumentRecord, FileReference, Timestamp};

use crate::error::RegistryResult;

/// Outcome of [`Registry::remove`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Removal {
    /// The record was removed; its blob can now be deleted.
    Removed(DocumentRecord),
    /// No record carried the reference. Nothing was written.
    NotFound,
}

impl Removal {
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }

    /// The removed record, if any.
    pub fn into_record(self) -> Option<DocumentRecord> {
        match self {
            Self::Removed(record) => Some(record),
            Self::NotFound => None,
        }
    }
}

/// Storage backend for document records.
///
/// Implementations must be thread-safe (`Send + Sync`). Each mutation is a
/// whole read-modify-write cycle and must not interleave with another
/// mutation on the same registry.
pub trait Registry: Send + Sync {
    /// All records in persisted (creation) order.
    ///
    /// A registry that has never been written returns an empty list.
    fn list(&self) -> RegistryResult<Vec<DocumentRecord>>;

    /// Append a new record with `updated_at == created_at`.
    ///
    /// Fails with `Validation` if `name` or `file_reference` is blank, if
    /// `created_at` is empty, or if the reference is already registered.
    fn create(
        &self,
        name: &str,
        category: Category,
        file_reference: &FileReference,
        created_at: Timestamp,
    ) -> RegistryResult<DocumentRecord>;

    /// Change a record's name and refresh its `updated_at`.
    ///
    /// Fails with `NotFound` if no record matches and with `Validation` if
    /// `new_name` is blank.
    fn rename(&self, file_reference: &FileReference, new_name: &str)
        -> RegistryResult<DocumentRecord>;

    /// Remove the record carrying `file_reference`.
    fn remove(&self, file_reference: &FileReference) -> RegistryResult<Removal>;

    /// Look up a single record.
    fn get(&self, file_reference: &FileReference) -> RegistryResult<Option<DocumentRecord>> {
        let records = self.list()?;
        Ok(crate::ops::find_index(&records, file_reference).map(|i| records[i].clone()))
    }
}
