//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Lower-level storage and catalog
//! errors are attached as children of these kinds.

use derive_more::{Display, Error};
use shelf_storage::Digest;
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a library failure.
///
/// ### Caller Errors
/// - [`ErrorKind::SourceNotFound`]: nothing was touched, fix the path and retry.
///
/// ### I/O Errors
/// - [`ErrorKind::Hash`]
/// - [`ErrorKind::CopyFailed`]
/// - [`ErrorKind::Persist`]
/// - [`ErrorKind::Storage`]
///
/// ### Data Errors
/// - [`ErrorKind::Catalog`]
/// - [`ErrorKind::Conflict`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The source path is missing, unreadable, or not a regular file.
    #[display("source file not found: {}", _0.display())]
    SourceNotFound(#[error(not(source))] PathBuf),
    /// The source could not be read to the end while hashing.
    #[display("failed to hash {}", _0.display())]
    Hash(#[error(not(source))] PathBuf),
    /// Copying into the library failed; no file or record was left behind.
    #[display("failed to copy {} to {}", from.display(), to.display())]
    CopyFailed { from: PathBuf, to: PathBuf },
    /// The catalog could not be written; the copied file was removed again.
    #[display("failed to persist metadata for {_0}")]
    Persist(#[error(not(source))] Digest),
    /// The storage root or a category directory could not be prepared.
    #[display("storage root unavailable")]
    Storage,
    /// The persisted catalog could not be loaded.
    #[display("catalog could not be loaded")]
    Catalog,
    /// Every candidate name for the destination was taken.
    #[display("no free name for {}", _0.display())]
    Conflict(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// The caller pointed at something that isn't an ingestible file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound(_))
    }

    /// A disk read or write failed.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Hash(_) | Self::CopyFailed { .. } | Self::Persist(_) | Self::Storage)
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        self.is_io()
    }
}
