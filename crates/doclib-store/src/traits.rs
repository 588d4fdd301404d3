use doclib_types::FileReference;

use crate::error::StoreResult;

/// Flat store for uploaded document bytes.
///
/// All implementations must satisfy these invariants:
/// - `save` never overwrites: every call yields a reference no other blob
///   in the store holds.
/// - Only `.pdf` names are accepted; anything else fails before any write.
/// - `delete` is idempotent: a missing blob yields `Ok(false)`.
/// - The store never interprets blob contents.
pub trait BlobStore: Send + Sync {
    /// Store `content` under a unique name derived from `original_name` and
    /// return its reference.
    fn save(&self, content: &[u8], original_name: &str) -> StoreResult<FileReference>;

    /// Read a blob back. Returns `Ok(None)` if it does not exist.
    fn read(&self, reference: &FileReference) -> StoreResult<Option<Vec<u8>>>;

    /// Check whether a blob exists.
    fn exists(&self, reference: &FileReference) -> StoreResult<bool>;

    /// Delete a blob. Returns `true` if it existed.
    fn delete(&self, reference: &FileReference) -> StoreResult<bool>;

    /// References of every stored blob, sorted.
    fn references(&self) -> StoreResult<Vec<FileReference>>;
}
