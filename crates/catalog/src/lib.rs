//! Durable metadata store for ingested files.
//!
//! The [`Catalog`] maps content [`Digest`](shelf_storage::Digest)s to
//! [`FileRecord`]s and is the single source of truth for "has this content
//! been ingested before". It lives as one JSON document at the storage root,
//! rewritten in full (temporary file, then rename) after every change:
//!
//! ```json
//! {
//!   "<digest>": {
//!     "original_name": "report.txt",
//!     "stored_name": "report.txt",
//!     "category": "documents",
//!     "size": 20,
//!     "hash": "<digest>",
//!     "path": "documents/report.txt"
//!   }
//! }
//! ```

mod catalog;
pub mod error;
mod record;

pub use crate::catalog::{Catalog, METADATA_FILE};
pub use crate::record::FileRecord;
