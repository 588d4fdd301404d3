//! In-memory registry for testing and ephemeral use.

use std::sync::RwLock;

use doclib_types::{Category, DocumentRecord, FileReference, Timestamp};

use crate::error::RegistryResult;
use crate::ops;
use crate::traits::{Registry, Removal};

/// An in-memory implementation of [`Registry`].
///
/// All records live in a `Vec` behind a `RwLock`. Data is lost when the
/// registry is dropped.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    records: RwLock<Vec<DocumentRecord>>,
}

impl InMemoryRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing list, kept as-is (duplicates included).
    pub fn with_records(records: Vec<DocumentRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl Registry for InMemoryRegistry {
    fn list(&self) -> RegistryResult<Vec<DocumentRecord>> {
        Ok(self.records.read().expect("lock poisoned").clone())
    }

    fn create(
        &self,
        name: &str,
        category: Category,
        file_reference: &FileReference,
        created_at: Timestamp,
    ) -> RegistryResult<DocumentRecord> {
        let mut records = self.records.write().expect("lock poisoned");
        ops::create(&mut records, name, category, file_reference, created_at)
    }

    fn rename(
        &self,
        file_reference: &FileReference,
        new_name: &str,
    ) -> RegistryResult<DocumentRecord> {
        let mut records = self.records.write().expect("lock poisoned");
        ops::rename(&mut records, file_reference, new_name)
    }

    fn remove(&self, file_reference: &FileReference) -> RegistryResult<Removal> {
        let mut records = self.records.write().expect("lock poisoned");
        Ok(match ops::remove(&mut records, file_reference) {
            Some(record) => Removal::Removed(record),
            None => Removal::NotFound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;

    #[test]
    fn create_list_rename_remove() {
        let reg = InMemoryRegistry::new();
        let reference = FileReference::new("/uploads/1-a.pdf");

        let created = reg
            .create("Manual A", Category::TouchComp, &reference, Timestamp::now())
            .unwrap();
        assert_eq!(reg.list().unwrap(), vec![created.clone()]);

        let renamed = reg.rename(&reference, "Manual A2").unwrap();
        assert_eq!(renamed.name, "Manual A2");
        assert_eq!(renamed.created_at, created.created_at);
        assert_ne!(renamed.updated_at, created.updated_at);

        assert!(reg.remove(&reference).unwrap().is_removed());
        assert_eq!(reg.remove(&reference).unwrap(), Removal::NotFound);
        assert!(reg.list().unwrap().is_empty());
    }

    #[test]
    fn duplicates_resolve_to_first_match() {
        let reference = FileReference::new("/uploads/1-a.pdf");
        let first = DocumentRecord::new("first", Category::TouchComp, reference.clone(), Timestamp::now());
        let second = DocumentRecord::new("second", Category::TouchComp, reference.clone(), Timestamp::now());
        let reg = InMemoryRegistry::with_records(vec![first, second]);

        assert_eq!(reg.get(&reference).unwrap().unwrap().name, "first");
        let renamed = reg.rename(&reference, "renamed").unwrap();
        assert_eq!(renamed.name, "renamed");
        let names: Vec<_> = reg.list().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["renamed", "second"]);
    }

    #[test]
    fn rename_missing() {
        let reg = InMemoryRegistry::new();
        assert!(matches!(
            reg.rename(&FileReference::new("/uploads/x.pdf"), "b"),
            Err(RegistryError::NotFound(_))
        ));
    }
}
