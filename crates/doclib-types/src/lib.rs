//! Foundation types for doclib.
//!
//! This crate provides the record and identity types shared by the blob
//! store, the document registry, the HTTP surface, and the client view
//! model. Every other doclib crate depends on `doclib-types`.
//!
//! # Key Types
//!
//! - [`DocumentRecord`] — One uploaded document: name, category, reference, timestamps
//! - [`Category`] — The fixed set of document categories
//! - [`FileReference`] — Storage locator that doubles as the record key
//! - [`Timestamp`] — Creation/update instant, preserved verbatim once stored

pub mod category;
pub mod error;
pub mod record;
pub mod reference;
pub mod temporal;

pub use category::Category;
pub use error::TypeError;
pub use record::DocumentRecord;
pub use reference::FileReference;
pub use temporal::Timestamp;
