//! HTTP server for doclib.
//!
//! A thin adapter over the document registry and the blob store: it parses
//! multipart uploads and JSON bodies, delegates to
//! [`Registry`](doclib_registry::Registry) and
//! [`BlobStore`](doclib_store::BlobStore), and maps their errors to status
//! codes. It never touches the record file directly.
//!
//! | Method | Path | Body | Success |
//! |---|---|---|---|
//! | POST | `/upload` | multipart `pdf`, `name`, `category` | record |
//! | GET | `/documents` | | record array |
//! | PUT | `/documents` | `{fileReference, newName}` | updated record |
//! | DELETE | `/documents` | `{fileReference}` | confirmation |
//!
//! There is no authentication. Administrator gating in the front end is a
//! display affordance only.

pub mod api;
pub mod config;
pub mod documents;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;
pub mod upload;

pub use api::{HealthResponse, RemoveRequest, RemoveResponse, RenameRequest};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::DocLibServer;
pub use state::AppState;
