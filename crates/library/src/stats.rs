use shelf_catalog::FileRecord;
use shelf_classify::Category;
use std::collections::BTreeMap;

/// Count and byte total for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStatistics {
    pub count: u64,
    pub total_bytes: u64,
}

/// Aggregate view over every record in a library.
///
/// Only categories holding at least one record appear in
/// [`per_category`](Self::per_category); use [`category`](Self::category) for
/// a zero-filled lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_count: u64,
    pub per_category: BTreeMap<Category, CategoryStatistics>,
}
impl Statistics {
    pub fn category(&self, category: Category) -> CategoryStatistics {
        self.per_category.get(&category).copied().unwrap_or_default()
    }

    pub fn total_bytes(&self) -> u64 {
        self.per_category.values().map(|stats| stats.total_bytes).sum()
    }
}
impl<'a> FromIterator<&'a FileRecord> for Statistics {
    fn from_iter<I: IntoIterator<Item = &'a FileRecord>>(records: I) -> Self {
        let mut stats = Statistics::default();
        for record in records {
            stats.total_count += 1;
            let entry = stats.per_category.entry(record.category).or_default();
            entry.count += 1;
            entry.total_bytes += record.size;
        }
        stats
    }
}
