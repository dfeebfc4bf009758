//! Shared types for the M3 Outfit storefront
//!
//! Domain models stored in the document database, the document envelope
//! used by every store implementation, and the remote response wrapper.

pub mod document;
pub mod models;
pub mod response;

// Re-exports
pub use document::{Document, DocumentError, FieldFilter};
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
