use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One searchable item.
///
/// Records are only ever stored fully populated: the loader drops any feed
/// line that does not yield all five fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Coarse partition label inherited from the source feed (a decade range).
    pub category: String,
    /// Display and search text.
    pub title: String,
    /// Stable unique identifier derived from the feed's external id; this is
    /// what deep links carry.
    pub key: String,
    /// Displayable asset (poster image URL).
    pub media_ref: String,
    /// External reference URL.
    pub info_link: String,
}

impl CatalogRecord {
    /// Lowercased `category + " " + title`, the text ranking runs against.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.category, self.title).to_lowercase()
    }
}

/// Immutable, deduplicated collection of records.
///
/// Built from scratch on each load; once built it is read-only and shared by
/// every concurrent handler for the rest of the process lifetime.
#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    by_key: HashMap<String, usize>,
}

impl Catalog {
    /// Build from parsed records, keeping the first occurrence of each key.
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        let mut kept = Vec::with_capacity(records.len());
        let mut by_key: HashMap<String, usize> = HashMap::with_capacity(records.len());
        for record in records {
            if by_key.contains_key(&record.key) {
                continue;
            }
            by_key.insert(record.key.clone(), kept.len());
            kept.push(record);
        }
        Self {
            records: kept,
            by_key,
        }
    }

    /// Look up a record by its deep-link key.
    pub fn get(&self, key: &str) -> Option<&CatalogRecord> {
        self.by_key.get(key).and_then(|&idx| self.records.get(idx))
    }

    /// All records, in first-seen source order.
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
