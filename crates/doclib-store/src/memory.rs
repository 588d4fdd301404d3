use std::collections::BTreeMap;
use std::sync::RwLock;

use doclib_types::FileReference;

use crate::error::{StoreError, StoreResult};
use crate::naming::{
    MAX_NAME_ATTEMPTS, ReferenceScheme, sanitize_original_name, stored_name, unix_millis_now,
};
use crate::traits::BlobStore;

/// In-memory blob store.
///
/// Intended for tests and embedding. Blobs are held behind a `RwLock`, keyed
/// by stored name, and follow the same naming rules as [`FsBlobStore`](crate::FsBlobStore).
pub struct InMemoryBlobStore {
    blobs: RwLock<BTreeMap<String, Vec<u8>>>,
    scheme: ReferenceScheme,
}

impl InMemoryBlobStore {
    /// Create a new empty store serving references under `/uploads`.
    pub fn new() -> Self {
        Self::with_prefix(crate::DEFAULT_URL_PREFIX)
    }

    pub fn with_prefix(url_prefix: &str) -> Self {
        Self {
            blobs: RwLock::new(BTreeMap::new()),
            scheme: ReferenceScheme::new(url_prefix),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn save(&self, content: &[u8], original_name: &str) -> StoreResult<FileReference> {
        let original = sanitize_original_name(original_name)?;
        let mut blobs = self.blobs.write().expect("lock poisoned");
        let mut millis = unix_millis_now();
        for _ in 0..MAX_NAME_ATTEMPTS {
            let name = stored_name(millis, &original);
            if !blobs.contains_key(&name) {
                blobs.insert(name.clone(), content.to_vec());
                return Ok(self.scheme.reference(&name));
            }
            millis += 1;
        }
        Err(StoreError::NameExhausted(original))
    }

    fn read(&self, reference: &FileReference) -> StoreResult<Option<Vec<u8>>> {
        let name = self.scheme.stored_name(reference)?;
        Ok(self.blobs.read().expect("lock poisoned").get(&name).cloned())
    }

    fn exists(&self, reference: &FileReference) -> StoreResult<bool> {
        let name = self.scheme.stored_name(reference)?;
        Ok(self.blobs.read().expect("lock poisoned").contains_key(&name))
    }

    fn delete(&self, reference: &FileReference) -> StoreResult<bool> {
        let name = self.scheme.stored_name(reference)?;
        Ok(self.blobs.write().expect("lock poisoned").remove(&name).is_some())
    }

    fn references(&self) -> StoreResult<Vec<FileReference>> {
        let blobs = self.blobs.read().expect("lock poisoned");
        Ok(blobs.keys().map(|name| self.scheme.reference(name)).collect())
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("blob_count", &self.len())
            .field("prefix", &self.scheme.prefix())
            .finish()
    }
}
