//! Blob storage for uploaded documents.
//!
//! A blob store holds the raw bytes of every uploaded PDF in one flat
//! directory. It knows nothing about names, categories, or timestamps: it
//! saves content under a generated unique file name and hands back a
//! [`FileReference`](doclib_types::FileReference) that the registry then
//! uses as the record key.
//!
//! # Naming
//!
//! Stored names are `<unix-millis>-<original file name>`. The reference is
//! the stored name under a URL prefix (default `/uploads`), so the HTTP
//! layer can serve the file back without a lookup.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`FsBlobStore`] -- files in a root directory on local disk
//! - [`InMemoryBlobStore`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Only `.pdf` names are accepted; the extension is authoritative.
//! 2. A stored name is never reused; saves never overwrite.
//! 3. Deleting a missing blob is not an error (`Ok(false)`).
//! 4. References are validated before touching disk; no path escapes the root.

pub mod error;
pub mod fs;
pub mod memory;
pub mod naming;
pub mod sniff;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsBlobStore;
pub use memory::InMemoryBlobStore;
pub use naming::{DEFAULT_URL_PREFIX, ReferenceScheme};
pub use sniff::pdf_mismatch;
pub use traits::BlobStore;
