//! The document registry.
//!
//! The registry owns the authoritative, ordered list of
//! [`DocumentRecord`](doclib_types::DocumentRecord)s. It is keyed by
//! [`FileReference`](doclib_types::FileReference) alone and offers four
//! operations: list, create, rename, and remove.
//!
//! # Backends
//!
//! All backends implement the [`Registry`] trait:
//!
//! - [`JsonFileRegistry`] -- one JSON file, re-read and atomically re-written
//!   on every operation
//! - [`InMemoryRegistry`] -- `Vec`-backed registry for tests and embedding
//!
//! # Rules
//!
//! 1. Records are appended in creation order; that order is never changed.
//! 2. A reference appears at most once. Creating a duplicate is rejected.
//! 3. Only `name` and `updated_at` change after creation.
//! 4. Removing an unknown reference reports [`Removal::NotFound`] and leaves
//!    the stored list untouched.

pub mod error;
pub mod file;
pub mod format;
pub mod memory;
mod ops;
pub mod traits;

pub use error::{RegistryError, RegistryResult};
pub use file::JsonFileRegistry;
pub use format::FORMAT_VERSION;
pub use memory::InMemoryRegistry;
pub use traits::{Registry, Removal};
