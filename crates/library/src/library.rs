use crate::error::{ErrorKind, Result};
use crate::naming::{MAX_NAME_ATTEMPTS, Naming, candidate};
use crate::stats::Statistics;
use exn::{OptionExt, ResultExt};
use shelf_catalog::{Catalog, FileRecord};
use shelf_classify::{Category, Rules, classify_path};
use shelf_storage::error::ErrorKind as StorageErrorKind;
use shelf_storage::{Digest, LocalStore, digest_file};
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// The (successful) outcome of [`Library::upload`].
///
/// Each variant carries the record describing the content; consumers can
/// pattern-match to decide what to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upload {
    /// New content: copied into its category directory and catalogued.
    Success(FileRecord),
    /// The content was already catalogued. Carries the existing record;
    /// nothing was copied or written.
    Duplicate(FileRecord),
}
impl Upload {
    pub fn record(&self) -> &FileRecord {
        match self {
            Self::Success(record) | Self::Duplicate(record) => record,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// A storage root with one directory per [`Category`] and its [`Catalog`].
///
/// The library exclusively owns both; every mutation goes through
/// [`upload`](Self::upload), which takes `&mut self`.
#[derive(Debug)]
pub struct Library {
    store: LocalStore,
    catalog: Catalog,
}
impl Library {
    /// Opens the library at `root`, creating the root and every category
    /// directory if they are missing, and loads the catalog.
    ///
    /// Relative roots are resolved against the current directory.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = std::path::absolute(root.as_ref()).or_raise(|| ErrorKind::Storage)?;
        let store = LocalStore::new(&root).or_raise(|| ErrorKind::Storage)?;
        for category in Category::ALL {
            store.create_dir(Path::new(category.as_str())).or_raise(|| ErrorKind::Storage)?;
        }
        let catalog = Catalog::load(&store).or_raise(|| ErrorKind::Catalog)?;
        tracing::debug!(records = catalog.len(), "library opened");
        Ok(Self { store, catalog })
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    /// Ingests the file at `source`.
    ///
    /// 1. `source` must be an existing, readable regular file, otherwise
    ///    [`ErrorKind::SourceNotFound`] is returned before anything changes.
    /// 2. Content already in the catalog yields [`Upload::Duplicate`] with the
    ///    existing record. Nothing is copied or written.
    /// 3. Otherwise the file is classified, named according to `naming`, and
    ///    copied to `<root>/<category>/<name>`. Occupied names get a `_1`,
    ///    `_2`, ... suffix before the extension; nothing is ever overwritten.
    /// 4. The record is committed and the catalog persisted before returning
    ///    [`Upload::Success`]. If persisting fails the copy is removed again.
    #[instrument(skip_all, fields(source = %source.as_ref().display(), ?naming))]
    pub fn upload(&mut self, source: impl AsRef<Path>, naming: Naming) -> Result<Upload> {
        let source = source.as_ref();
        let not_found = || ErrorKind::SourceNotFound(source.to_path_buf());
        match fs::metadata(source) {
            Ok(metadata) if metadata.is_file() => {},
            Ok(_) => exn::bail!(not_found()),
            Err(e) => return Err(e).or_raise(not_found),
        }
        let original_name = source.file_name().ok_or_raise(not_found)?.to_string_lossy().into_owned();

        let digest = match digest_file(source) {
            Ok(digest) => digest,
            Err(e) if matches!(e.deref(), StorageErrorKind::NotFound(_) | StorageErrorKind::PermissionDenied(_)) => {
                return Err(e).or_raise(not_found);
            },
            Err(e) => return Err(e).or_raise(|| ErrorKind::Hash(source.to_path_buf())),
        };

        if let Some(existing) = self.catalog.get(&digest) {
            tracing::debug!(%digest, existing = %existing.path.display(), "content already shelved");
            return Ok(Upload::Duplicate(existing.clone()));
        }

        let category = classify_path(source);
        let preferred = naming.file_name(&original_name, &digest);
        let (stored_name, size) = self.place(source, category, &preferred)?;
        let record = FileRecord::new(original_name, stored_name, category, size, digest.clone());

        if let Err(e) = self.catalog.commit(&self.store, record.clone()) {
            tracing::warn!(%digest, path = %record.path.display(), "metadata not persisted; removing copy");
            if let Err(cleanup) = self.store.delete(&record.path) {
                tracing::error!(path = %record.path.display(), error = ?cleanup, "failed to remove uncommitted copy");
            }
            return Err(e).or_raise(|| ErrorKind::Persist(digest));
        }
        tracing::info!(%digest, %category, path = %record.path.display(), size, "file shelved");
        Ok(Upload::Success(record))
    }

    /// Copies `source` into the `category` directory under the first free
    /// candidate of `preferred`, returning the stored name and bytes copied.
    fn place(&self, source: &Path, category: Category, preferred: &str) -> Result<(String, u64)> {
        let directory = PathBuf::from(category.as_str());
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = candidate(preferred, attempt);
            let path = directory.join(&name);
            let copy_failed = || ErrorKind::CopyFailed {
                from: source.to_path_buf(),
                to: self.store.root().join(&path),
            };
            // Cheap pre-check; the no-clobber copy below is the real arbiter.
            if self.store.exists(&path).or_raise(copy_failed)? {
                tracing::debug!(path = %path.display(), "name taken; trying next suffix");
                continue;
            }
            match self.store.copy_in(source, &path) {
                Ok(copied) => return Ok((name, copied)),
                Err(e) if matches!(e.deref(), StorageErrorKind::AlreadyExists(_)) => {
                    tracing::debug!(path = %path.display(), "name taken during copy; trying next suffix");
                },
                Err(e) => return Err(e).or_raise(copy_failed),
            }
        }
        exn::bail!(ErrorKind::Conflict(directory.join(preferred)))
    }

    /// Every record, optionally restricted to one category.
    ///
    /// Ordered by digest; the order carries no other meaning.
    pub fn list(&self, category: Option<Category>) -> Vec<&FileRecord> {
        match category {
            Some(category) => self.catalog.records_in(category).collect(),
            None => self.catalog.records().collect(),
        }
    }

    pub fn get(&self, digest: &Digest) -> Option<&FileRecord> {
        self.catalog.get(digest)
    }

    /// Counts and byte totals, recomputed from the catalog on every call.
    pub fn statistics(&self) -> Statistics {
        self.catalog.records().collect()
    }

    /// The classification rule table, in matching order.
    pub fn categories() -> impl Iterator<Item = (Category, &'static Rules)> {
        shelf_classify::table()
    }
}
