//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use shelf_storage::Digest;

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Reading or writing the metadata file failed.
    #[display("metadata storage error")]
    Storage,
    /// The metadata file exists but does not describe a valid catalog.
    #[display("invalid catalog data")]
    InvalidData,
    /// The catalog could not be encoded.
    #[display("catalog serialization error")]
    Serialize,
    /// Records are immutable; a digest can only be inserted once.
    #[display("digest already catalogued: {_0}")]
    Duplicate(#[error(not(source))] Digest),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage)
    }
}
