use std::sync::Arc;

use doclib_registry::{Registry, Removal};
use doclib_store::BlobStore;
use doclib_types::{Category, DocumentRecord, FileReference, Timestamp};
use tracing::warn;

use crate::error::{ServerError, ServerResult};

/// Collaborators shared by every handler.
///
/// The two operations that touch both the registry and the blob store live
/// here so the HTTP handlers and the command line order them the same way.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn Registry>,
    pub blobs: Arc<dyn BlobStore>,
}

impl AppState {
    pub fn new(registry: Arc<dyn Registry>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { registry, blobs }
    }

    /// Store the blob, then append its record.
    ///
    /// If the append fails the blob is deleted again; should that fail too,
    /// an orphan file is left behind rather than a record with no file.
    pub fn upload_document(
        &self,
        content: &[u8],
        file_name: &str,
        name: &str,
        category: Category,
    ) -> ServerResult<DocumentRecord> {
        let reference = self.blobs.save(content, file_name)?;
        match self
            .registry
            .create(name, category, &reference, Timestamp::now())
        {
            Ok(record) => Ok(record),
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(&reference) {
                    warn!(file_reference = %reference, error = %cleanup, "orphan blob left after failed create");
                }
                Err(e.into())
            }
        }
    }

    /// Remove the record, then its blob. Returns `None` if no record matched.
    ///
    /// Once the record is gone the removal has happened; a blob that is
    /// already missing or cannot be deleted is only logged.
    pub fn remove_document(&self, reference: &FileReference) -> ServerResult<Option<DocumentRecord>> {
        let record = match self.registry.remove(reference)? {
            Removal::Removed(record) => record,
            Removal::NotFound => return Ok(None),
        };
        match self.blobs.delete(&record.file_reference) {
            Ok(true) => {}
            Ok(false) => warn!(
                file_reference = %record.file_reference,
                "blob already missing while removing document"
            ),
            Err(e) => warn!(
                file_reference = %record.file_reference,
                error = %e,
                "could not delete blob; leaving orphan file"
            ),
        }
        Ok(Some(record))
    }
}

/// Run synchronous registry/blob work on the blocking pool.
pub(crate) async fn blocking<T, F>(work: F) -> ServerResult<T>
where
    F: FnOnce() -> ServerResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclib_registry::{InMemoryRegistry, RegistryError, RegistryResult};
    use doclib_store::InMemoryBlobStore;

    /// Registry whose writes always fail.
    struct ReadOnlyRegistry;

    impl Registry for ReadOnlyRegistry {
        fn list(&self) -> RegistryResult<Vec<DocumentRecord>> {
            Ok(Vec::new())
        }

        fn create(
            &self,
            _name: &str,
            _category: Category,
            _file_reference: &FileReference,
            _created_at: Timestamp,
        ) -> RegistryResult<DocumentRecord> {
            Err(RegistryError::Io(std::io::Error::other("read-only")))
        }

        fn rename(&self, r: &FileReference, _new_name: &str) -> RegistryResult<DocumentRecord> {
            Err(RegistryError::NotFound(r.clone()))
        }

        fn remove(&self, _r: &FileReference) -> RegistryResult<Removal> {
            Ok(Removal::NotFound)
        }
    }

    #[test]
    fn failed_create_removes_blob() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let state = AppState::new(Arc::new(ReadOnlyRegistry), blobs.clone());

        let err = state
            .upload_document(b"%PDF-1.4", "a.pdf", "A", Category::TouchComp)
            .unwrap_err();
        assert!(matches!(err, ServerError::Registry(RegistryError::Io(_))));
        assert!(blobs.is_empty());
    }

    #[test]
    fn remove_tolerates_missing_blob() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let state = AppState::new(Arc::new(InMemoryRegistry::new()), blobs.clone());

        let record = state
            .upload_document(b"%PDF-1.4", "a.pdf", "A", Category::TouchComp)
            .unwrap();
        blobs.delete(&record.file_reference).unwrap();

        let removed = state.remove_document(&record.file_reference).unwrap();
        assert_eq!(removed, Some(record.clone()));
        assert!(state.remove_document(&record.file_reference).unwrap().is_none());
    }
}
