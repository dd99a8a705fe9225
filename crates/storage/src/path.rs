//! Path validation for root-relative storage paths.
//!
//! Every path handed to [`LocalStore`](crate::LocalStore) or read back from the
//! catalog goes through [`validate`] so that nothing escapes the storage root.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Normalizes a root-relative storage path lexically.
///
/// `.` and empty segments are dropped, `..` consumes the previous segment, and
/// a leading `/` is ignored. Paths that climb above the root, contain a NUL,
/// carry a Windows prefix, or normalize to nothing are
/// [`InvalidPath`](ErrorKind::InvalidPath). Backslashes are ordinary bytes.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use shelf_storage::validate_path;
/// assert!(validate_path("documents/report.txt").is_ok());
/// assert!(validate_path("code/../other/blob").is_ok()); // (never leaves root)
/// assert!(validate_path("../etc/passwd").is_err());
/// assert!(validate_path("a/../../b").is_err());
/// assert!(validate_path("a\0b").is_err());
/// assert_eq!(
///     validate_path("./images//./photo.png/").unwrap(),
///     Path::new("images/photo.png")
/// );
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let invalid = || Err(exn::Exn::from(ErrorKind::InvalidPath(path.to_path_buf())));
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            // Interior NULs survive `components()` but truncate at the syscall boundary.
            Component::Normal(part) if part.as_encoded_bytes().contains(&0) => return invalid(),
            Component::Normal(part) => normalized.push(part),
            Component::CurDir | Component::RootDir => {},
            Component::ParentDir if normalized.pop() => {},
            Component::ParentDir | Component::Prefix(_) => return invalid(),
        }
    }
    if normalized.as_os_str().is_empty() {
        return invalid();
    }
    Ok(normalized)
}
