//! Local filesystem storage rooted at a single directory.
//!
//! All paths taken by [`LocalStore`] are relative to its root and validated
//! with [`validate_path`](crate::validate_path). Writes go through a temporary
//! file in the destination directory followed by a rename, so readers never
//! observe a partially written file.

use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_path;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Local filesystem storage.
///
/// # Examples
///
/// ```no_run
/// use shelf_storage::LocalStore;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = LocalStore::new("/srv/shelf").map_err(|e| format!("{e:?}"))?;
/// store.write_atomic(Path::new("notes/hello.txt"), b"hello").map_err(|e| format!("{e:?}"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}
impl LocalStore {
    /// Opens (creating if necessary) the storage root.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPath`](ErrorKind::InvalidPath) if `root` is relative or
    /// exists but is not a directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidPath(root));
            }
        } else {
            fs::create_dir_all(&root).map_err(|e| ErrorKind::from_io(e, &root))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the absolute path for a relative storage path.
    pub fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    /// Creates a directory (and its parents) below the root.
    pub fn create_dir(&self, path: &Path) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::create_dir_all(&abs_path).map_err(|e| ErrorKind::from_io(e, path))?)
    }

    pub fn exists(&self, path: &Path) -> Result<bool> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::exists(&abs_path).map_err(|e| ErrorKind::from_io(e, path))?)
    }

    /// Reads a whole file. Returns [`NotFound`](ErrorKind::NotFound) if absent.
    pub fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::read(&abs_path).map_err(|e| ErrorKind::from_io(e, path))?)
    }

    /// Replaces `path` with `data` atomically.
    ///
    /// The data is written and synced to a sibling temporary file which is
    /// then renamed over the destination. On failure the previous content of
    /// `path` (if any) is untouched and the temporary file is removed.
    pub fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        let mut staged = self.stage_beside(&abs_path, path)?;
        staged.write_all(data).map_err(ErrorKind::Io)?;
        staged.as_file().sync_all().map_err(ErrorKind::Io)?;
        staged.persist(&abs_path).map_err(|e| ErrorKind::from_io(e.error, path))?;
        Ok(())
    }

    /// Copies an external `source` file to `path` inside the store, refusing
    /// to replace anything already there.
    ///
    /// Permissions and modification time are carried over. Returns the number
    /// of bytes copied. If `path` is occupied the copy is discarded and
    /// [`AlreadyExists`](ErrorKind::AlreadyExists) is returned; occupancy is
    /// decided by the final no-clobber rename, not by an earlier check.
    pub fn copy_in(&self, source: &Path, path: &Path) -> Result<u64> {
        let abs_path = self.absolute_path(path)?;
        let mut reader = File::open(source).map_err(|e| ErrorKind::from_io(e, source))?;
        let metadata = reader.metadata().map_err(|e| ErrorKind::from_io(e, source))?;
        let mut staged = self.stage_beside(&abs_path, path)?;
        let copied = io::copy(&mut reader, staged.as_file_mut()).map_err(ErrorKind::Io)?;
        let file = staged.as_file();
        file.set_permissions(metadata.permissions()).map_err(ErrorKind::Io)?;
        // Not every platform reports mtime; the content is what matters.
        if let Ok(modified) = metadata.modified() {
            file.set_modified(modified).map_err(ErrorKind::Io)?;
        }
        file.sync_all().map_err(ErrorKind::Io)?;
        staged.persist_noclobber(&abs_path).map_err(|e| ErrorKind::from_io(e.error, path))?;
        Ok(copied)
    }

    pub fn delete(&self, path: &Path) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::remove_file(&abs_path).map_err(|e| ErrorKind::from_io(e, path))?)
    }

    /// Temporary file in the same directory as `abs_path`, so the final
    /// rename never crosses a filesystem boundary.
    fn stage_beside(&self, abs_path: &Path, path: &Path) -> Result<NamedTempFile> {
        let parent = abs_path.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent).map_err(|e| ErrorKind::from_io(e, path))?;
        Ok(NamedTempFile::new_in(parent).map_err(|e| ErrorKind::from_io(e, path))?)
    }
}
