//! Duplicate trip detection for ETC usage records
//!
//! Records are keyed on [`UsageRecord::dedup_key`]: entry and exit date and
//! time, charged fee and card identifier. The first occurrence of a key is
//! the original; every later occurrence is a duplicate.

use std::collections::HashMap;

use tracing::debug;

use crate::app::models::UsageRecord;

/// Result of one duplicate detection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateSummary {
    /// Occurrences beyond the first, summed over all keys
    pub duplicate_count: usize,

    /// Occurrences per dedup key
    pub counts: HashMap<String, usize>,

    /// Per input index: whether the key had been seen earlier in the pass
    pub is_duplicate: Vec<bool>,
}

impl DuplicateSummary {
    /// Number of records examined
    pub fn total_records(&self) -> usize {
        self.is_duplicate.len()
    }

    /// Number of distinct trips
    pub fn unique_count(&self) -> usize {
        self.counts.len()
    }

    /// Keys that occur more than once, with their counts
    pub fn repeated_keys(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(key, count)| (key.as_str(), *count))
    }
}

/// Count duplicate trips in one linear pass
pub fn detect_duplicates<'a, I>(records: I) -> DuplicateSummary
where
    I: IntoIterator<Item = &'a UsageRecord>,
{
    let mut summary = DuplicateSummary::default();

    for record in records {
        let count = summary.counts.entry(record.dedup_key()).or_insert(0);
        *count += 1;

        let duplicate = *count > 1;
        if duplicate {
            summary.duplicate_count += 1;
        }
        summary.is_duplicate.push(duplicate);
    }

    debug!(
        "Duplicate detection: {} records, {} unique, {} duplicates",
        summary.total_records(),
        summary.unique_count(),
        summary.duplicate_count
    );

    summary
}

/// Check whether two records describe the same trip on the same card
pub fn are_duplicates(a: &UsageRecord, b: &UsageRecord) -> bool {
    a.dedup_key() == b.dedup_key()
}
