//! Client-side view model for doclib.
//!
//! Mirrors what the browser shows: one numbered list per category, the PDF
//! viewer target, and the upload form. The view only ever applies changes
//! the server has confirmed, so it never runs ahead of the registry.
//!
//! Numbering is derived, never stored. On load, counters are rebuilt from
//! the fetched list before anything is rendered. A create bumps only its
//! category's counter; a delete renumbers the rest of that category from
//! visual position, so numbers stay dense whatever order entries are
//! deleted in.
//!
//! # Administrator view
//!
//! Rename/delete/upload controls are shown only when the
//! [`ViewCapabilities`] passed to rendering allow it. The password check in
//! [`AdminGate`] is a display affordance, not access control: the HTTP API
//! performs no authentication of its own.

pub mod admin;
pub mod counters;
pub mod error;
pub mod list;
pub mod page;
pub mod upload;
pub mod viewer;

pub use admin::{AdminGate, ViewCapabilities};
pub use counters::CategoryCounters;
pub use error::{ViewError, ViewResult};
pub use list::{Control, DocumentListView, ListEntry, RenderedItem, RenderedSection};
pub use page::{LibraryPage, RenderedPage};
pub use upload::{PickedFile, UploadDraft};
pub use viewer::PdfViewer;
