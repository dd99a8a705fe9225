use crate::error::{ErrorKind, Result};
use crate::record::FileRecord;
use exn::ResultExt;
use shelf_classify::Category;
use shelf_storage::error::ErrorKind as StorageErrorKind;
use shelf_storage::{Digest, LocalStore, validate_path};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ops::Deref;
use std::path::Path;
use tracing::instrument;

/// Name of the metadata file at the storage root.
pub const METADATA_FILE: &str = "metadata.json";

/// The digest-to-record mapping backing a library.
///
/// Held in memory and written back in full on every change. Records iterate
/// in ascending digest order, which is stable across reloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: BTreeMap<Digest, FileRecord>,
}
impl Catalog {
    /// An empty catalog, as on first run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads [`METADATA_FILE`] from the root of `store`.
    ///
    /// A missing file is the first-run case and yields an empty catalog.
    ///
    /// # Errors
    /// - [`ErrorKind::Storage`] if the file exists but cannot be read.
    /// - [`ErrorKind::InvalidData`] if it cannot be decoded, a record is keyed
    ///   under a digest other than its own, or a record path is not a valid
    ///   root-relative path.
    #[instrument(skip_all, fields(root = %store.root().display()))]
    pub fn load(store: &LocalStore) -> Result<Self> {
        let bytes = match store.read(Path::new(METADATA_FILE)) {
            Ok(bytes) => bytes,
            Err(e) if matches!(e.deref(), StorageErrorKind::NotFound(_)) => {
                tracing::debug!("no metadata file yet; starting with an empty catalog");
                return Ok(Self::new());
            },
            Err(e) => return Err(e).or_raise(|| ErrorKind::Storage),
        };
        let records: BTreeMap<Digest, FileRecord> =
            serde_json::from_slice(&bytes).or_raise(|| ErrorKind::InvalidData)?;
        for (digest, record) in &records {
            if *digest != record.hash {
                tracing::error!(%digest, hash = %record.hash, "record stored under the wrong digest");
                exn::bail!(ErrorKind::InvalidData);
            }
            validate_path(&record.path).or_raise(|| ErrorKind::InvalidData)?;
        }
        tracing::debug!(records = records.len(), "catalog loaded");
        Ok(Self { records })
    }

    /// Writes the whole catalog to [`METADATA_FILE`], replacing it atomically.
    ///
    /// On failure the previously persisted catalog is left intact.
    pub fn persist(&self, store: &LocalStore) -> Result<()> {
        let json = serde_json::to_vec_pretty(&self.records).or_raise(|| ErrorKind::Serialize)?;
        store.write_atomic(Path::new(METADATA_FILE), &json).or_raise(|| ErrorKind::Storage)
    }

    /// Inserts `record` under its own digest, then persists the catalog.
    ///
    /// If persisting fails the insert is undone, so memory never runs ahead
    /// of what is on disk.
    pub fn commit(&mut self, store: &LocalStore, record: FileRecord) -> Result<()> {
        let digest = record.hash.clone();
        self.put(record)?;
        if let Err(e) = self.persist(store) {
            self.records.remove(&digest);
            tracing::warn!(%digest, "persist failed; catalog insert rolled back");
            return Err(e);
        }
        Ok(())
    }

    /// Inserts `record` in memory only.
    ///
    /// Returns [`ErrorKind::Duplicate`] if its digest is already catalogued.
    pub fn put(&mut self, record: FileRecord) -> Result<&FileRecord> {
        match self.records.entry(record.hash.clone()) {
            Entry::Occupied(_) => exn::bail!(ErrorKind::Duplicate(record.hash)),
            Entry::Vacant(slot) => Ok(slot.insert(record)),
        }
    }

    pub fn contains(&self, digest: &Digest) -> bool {
        self.records.contains_key(digest)
    }

    pub fn get(&self, digest: &Digest) -> Option<&FileRecord> {
        self.records.get(digest)
    }

    /// All records in ascending digest order.
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values()
    }

    /// Records belonging to `category`, in ascending digest order.
    pub fn records_in(&self, category: Category) -> impl Iterator<Item = &FileRecord> {
        self.records().filter(move |record| record.category == category)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use shelf_storage::digest_reader;
    use std::fs;

    fn store() -> (tempfile::TempDir, LocalStore) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path()).unwrap();
        (temp_dir, store)
    }

    fn record(content: &[u8], name: &str, category: Category) -> FileRecord {
        let digest = digest_reader(content).unwrap();
        FileRecord::new(name, name, category, content.len() as u64, digest)
    }

    #[test]
    fn test_load_without_metadata_is_empty() {
        let (_temp_dir, store) = store();
        let catalog = Catalog::load(&store).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_persist_round_trip() {
        let (_temp_dir, store) = store();
        let mut catalog = Catalog::new();
        catalog.commit(&store, record(b"hello", "hello.txt", Category::Documents)).unwrap();
        catalog.commit(&store, record(b"fn main() {}", "main.rs", Category::Code)).unwrap();
        let reloaded = Catalog::load(&store).unwrap();
        assert_eq!(reloaded, catalog);
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_persisted_shape() {
        let (temp_dir, store) = store();
        let mut catalog = Catalog::new();
        let rec = record(b"hello", "hello.txt", Category::Documents);
        catalog.commit(&store, rec.clone()).unwrap();
        let raw = fs::read(temp_dir.path().join(METADATA_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        let entry = &value[rec.hash.as_str()];
        assert_eq!(entry["original_name"], "hello.txt");
        assert_eq!(entry["stored_name"], "hello.txt");
        assert_eq!(entry["category"], "documents");
        assert_eq!(entry["size"], 5);
        assert_eq!(entry["hash"], rec.hash.as_str());
        assert_eq!(entry["path"], "documents/hello.txt");
        assert_eq!(entry.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_put_rejects_duplicates() {
        let mut catalog = Catalog::new();
        catalog.put(record(b"same", "a.txt", Category::Documents)).unwrap();
        let err = catalog.put(record(b"same", "b.txt", Category::Documents)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Duplicate(_)));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records().next().unwrap().original_name, "a.txt");
    }

    #[test]
    fn test_contains_and_get() {
        let mut catalog = Catalog::new();
        let rec = record(b"bytes", "a.bin", Category::Other);
        assert!(!catalog.contains(&rec.hash));
        catalog.put(rec.clone()).unwrap();
        assert!(catalog.contains(&rec.hash));
        assert_eq!(catalog.get(&rec.hash), Some(&rec));
    }

    #[test]
    fn test_records_in() {
        let mut catalog = Catalog::new();
        catalog.put(record(b"1", "a.txt", Category::Documents)).unwrap();
        catalog.put(record(b"2", "b.txt", Category::Documents)).unwrap();
        catalog.put(record(b"3", "c.png", Category::Images)).unwrap();
        assert_eq!(catalog.records_in(Category::Documents).count(), 2);
        assert_eq!(catalog.records_in(Category::Images).count(), 1);
        assert_eq!(catalog.records_in(Category::Audio).count(), 0);
    }

    #[test]
    fn test_failed_commit_rolls_back() {
        let (temp_dir, store) = store();
        let mut catalog = Catalog::new();
        // A directory where the metadata file should be makes the final rename fail.
        fs::create_dir(temp_dir.path().join(METADATA_FILE)).unwrap();
        let err = catalog.commit(&store, record(b"x", "x.txt", Category::Documents)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Storage));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_duplicate_commit_writes_nothing() {
        let (temp_dir, store) = store();
        let mut catalog = Catalog::new();
        catalog.commit(&store, record(b"first", "first.txt", Category::Documents)).unwrap();
        let before = fs::read(temp_dir.path().join(METADATA_FILE)).unwrap();
        let err = catalog.commit(&store, record(b"first", "again.txt", Category::Documents)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Duplicate(_)));
        assert_eq!(fs::read(temp_dir.path().join(METADATA_FILE)).unwrap(), before);
        assert_eq!(Catalog::load(&store).unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_persist_keeps_previous_file() {
        use std::os::unix::fs::PermissionsExt;

        let (temp_dir, store) = store();
        let mut catalog = Catalog::new();
        catalog.commit(&store, record(b"first", "first.txt", Category::Documents)).unwrap();
        let metadata = temp_dir.path().join(METADATA_FILE);
        let before = fs::read(&metadata).unwrap();

        // No new entries in the root: the staged file can't be created.
        fs::set_permissions(temp_dir.path(), fs::Permissions::from_mode(0o555)).unwrap();
        if fs::File::create(temp_dir.path().join("write-check")).is_ok() {
            // Permissions aren't enforced for this user (e.g. root); nothing to check.
            fs::set_permissions(temp_dir.path(), fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }
        let err = catalog.commit(&store, record(b"second", "second.txt", Category::Documents)).unwrap_err();
        fs::set_permissions(temp_dir.path(), fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(&*err, ErrorKind::Storage));
        assert_eq!(fs::read(&metadata).unwrap(), before);
        assert_eq!(catalog.len(), 1);
        assert_eq!(Catalog::load(&store).unwrap(), catalog);
    }

    const EMPTY_DIGEST: &str = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262";

    fn single_entry(key: &str, hash: &str, category: &str, path: &str) -> String {
        serde_json::json!({
            key: {
                "original_name": "a",
                "stored_name": "a",
                "category": category,
                "size": 0,
                "hash": hash,
                "path": path,
            }
        })
        .to_string()
    }

    #[rstest]
    #[case::not_json("definitely not json".to_string())]
    #[case::wrong_shape("[1, 2, 3]".to_string())]
    #[case::bad_digest(single_entry("abc", "abc", "other", "other/a"))]
    #[case::unknown_category(single_entry(EMPTY_DIGEST, EMPTY_DIGEST, "memes", "memes/a"))]
    #[case::key_mismatch(single_entry(&"0".repeat(64), EMPTY_DIGEST, "other", "other/a"))]
    #[case::escaping_path(single_entry(EMPTY_DIGEST, EMPTY_DIGEST, "other", "../../a"))]
    fn test_load_rejects_invalid_data(#[case] contents: String) {
        let (temp_dir, store) = store();
        fs::write(temp_dir.path().join(METADATA_FILE), contents).unwrap();
        let err = Catalog::load(&store).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidData));
    }

    #[test]
    fn test_load_empty_object() {
        let (temp_dir, store) = store();
        fs::write(temp_dir.path().join(METADATA_FILE), "{}").unwrap();
        assert!(Catalog::load(&store).unwrap().is_empty());
    }
}
