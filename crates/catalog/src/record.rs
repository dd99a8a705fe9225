use serde::{Deserialize, Serialize};
use shelf_classify::Category;
use shelf_storage::Digest;
use std::path::PathBuf;

/// Metadata for one uniquely-ingested piece of content.
///
/// Identified by [`hash`](Self::hash); created once on first ingestion and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Filename as supplied by the caller. Not unique.
    pub original_name: String,
    /// Filename inside the category directory. Unique within that directory.
    pub stored_name: String,
    pub category: Category,
    /// Size in bytes.
    pub size: u64,
    pub hash: Digest,
    /// Location relative to the storage root, always `<category>/<stored_name>`.
    pub path: PathBuf,
}
impl FileRecord {
    pub fn new(
        original_name: impl Into<String>,
        stored_name: impl Into<String>,
        category: Category,
        size: u64,
        hash: Digest,
    ) -> Self {
        let stored_name = stored_name.into();
        Self {
            original_name: original_name.into(),
            path: PathBuf::from(category.as_str()).join(&stored_name),
            stored_name,
            category,
            size,
            hash,
        }
    }
}
