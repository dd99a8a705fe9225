//! Storage Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

/// A storage error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// File does not exist
    #[display("file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// File already exists (for operations that require new files)
    #[display("file already exists: {}", _0.display())]
    AlreadyExists(#[error(not(source))] PathBuf),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// Path contains invalid characters or escapes root
    #[display("invalid path: {}", _0.display())]
    InvalidPath(#[error(not(source))] PathBuf),
    /// Not a 64 character lowercase hex digest
    #[display("invalid digest: {_0:?}")]
    InvalidDigest(#[error(not(source))] String),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Maps an I/O error onto the actionable kinds, keeping `path` for context.
    pub fn from_io(err: IoError, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists(path.to_path_buf()),
            _ => Self::Io(err),
        }
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind as IoKind;

    #[test]
    fn test_from_io_keeps_path() {
        let path = Path::new("documents/report.txt");
        let kind = ErrorKind::from_io(IoError::from(IoKind::NotFound), path);
        assert!(matches!(&kind, ErrorKind::NotFound(p) if p == path));
        let kind = ErrorKind::from_io(IoError::from(IoKind::AlreadyExists), path);
        assert!(matches!(&kind, ErrorKind::AlreadyExists(p) if p == path));
        let kind = ErrorKind::from_io(IoError::from(IoKind::Interrupted), path);
        assert!(matches!(kind, ErrorKind::Io(_)));
    }

    #[test]
    fn test_retryable() {
        assert!(ErrorKind::Io(IoError::from(IoKind::Interrupted)).is_retryable());
        assert!(!ErrorKind::NotFound(PathBuf::from("x")).is_retryable());
        assert!(!ErrorKind::InvalidDigest("abc".to_string()).is_retryable());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorKind::NotFound(PathBuf::from("a/b.txt")).to_string(), "file not found: a/b.txt");
        assert_eq!(ErrorKind::InvalidDigest("xyz".to_string()).to_string(), r#"invalid digest: "xyz""#);
    }
}
