//! Ingestion engine: classify, deduplicate and shelve files.
//!
//! A [`Library`] owns a storage root laid out as one directory per
//! [`Category`] plus a metadata file:
//!
//! ```text
//! <root>/
//!   documents/  images/  videos/  audio/
//!   archives/   code/    data/    other/
//!   metadata.json
//! ```
//!
//! [`Library::upload`] hashes a file, returns early if that content is
//! already catalogued, otherwise classifies it, copies it under a free name,
//! and commits its [`FileRecord`]. [`Library::list`] and
//! [`Library::statistics`] are read-only views over the catalog.
//!
//! ```no_run
//! use shelf_library::{Library, Naming, Upload};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut library = Library::open("uploads").map_err(|e| format!("{e:?}"))?;
//! match library.upload("report.txt", Naming::Original).map_err(|e| format!("{e:?}"))? {
//!     Upload::Success(record) => println!("stored at {}", record.path.display()),
//!     Upload::Duplicate(record) => println!("already have it as {}", record.original_name),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
mod library;
mod naming;
mod stats;

pub use crate::library::{Library, Upload};
pub use crate::naming::Naming;
pub use crate::stats::{CategoryStatistics, Statistics};
pub use shelf_catalog::FileRecord;
pub use shelf_classify::{Category, Rules};
pub use shelf_storage::Digest;
