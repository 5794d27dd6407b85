//! Main record processor implementation and batch orchestration
//!
//! This module walks a parsed batch in input order, converting and storing
//! each record while counting saved, skipped and errored records.

use std::collections::HashSet;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::conversion::convert;
use super::stats::ProcessingResult;
use super::storage::{RecordStore, StoredRecord};
use crate::Error;
use crate::app::models::{BatchStats, ParsedRow, RowRejection, UsageRecord};
use crate::config::ProcessorConfig;
use crate::constants::PROGRESS_BAR_THRESHOLD;

/// One entry of the store pass
enum BatchItem<'a> {
    /// Convert and store
    Record(&'a UsageRecord),
    /// Count as errored without conversion
    Invalid(&'a Error),
}

/// Record processor for parsed ETC batches
///
/// The processor is synchronous: cancellation is checked once per record
/// through a [`CancellationToken`], never awaited.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use etc_data_processor::app::services::record_processor::{MemoryStore, RecordProcessor};
/// use tokio_util::sync::CancellationToken;
///
/// # fn example(records: Vec<etc_data_processor::UsageRecord>) {
/// let store = Arc::new(MemoryStore::new());
/// let processor = RecordProcessor::new(store.clone());
///
/// let result = processor.process_records(&records, "account-1", true, &CancellationToken::new());
/// println!("{}", result.summary());
/// # }
/// ```
pub struct RecordProcessor {
    store: Arc<dyn RecordStore>,
    store_invalid_rows: bool,
    progress_bar: Option<ProgressBar>,
}

impl std::fmt::Debug for RecordProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordProcessor")
            .field("store_invalid_rows", &self.store_invalid_rows)
            .field("progress_bar", &self.progress_bar.is_some())
            .finish_non_exhaustive()
    }
}

impl RecordProcessor {
    /// Create a processor that rejects rows which failed validation
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            store_invalid_rows: false,
            progress_bar: None,
        }
    }

    pub fn from_config(store: Arc<dyn RecordStore>, config: &ProcessorConfig) -> Self {
        Self::new(store).with_store_invalid_rows(config.store_invalid_rows)
    }

    /// Store rows that failed validation anyway (legacy best-effort policy)
    pub fn with_store_invalid_rows(mut self, store_invalid_rows: bool) -> Self {
        self.store_invalid_rows = store_invalid_rows;
        self
    }

    /// Report per-record progress on the given bar
    pub fn with_progress_bar(mut self, progress_bar: ProgressBar) -> Self {
        self.progress_bar = Some(progress_bar);
        self
    }

    pub fn store_invalid_rows(&self) -> bool {
        self.store_invalid_rows
    }

    /// Convert and store a sequence of records
    pub fn process_records(
        &self,
        records: &[UsageRecord],
        account_id: &str,
        skip_duplicates: bool,
        cancel: &CancellationToken,
    ) -> ProcessingResult {
        let items: Vec<BatchItem<'_>> = records.iter().map(BatchItem::Record).collect();
        self.run(&items, account_id, skip_duplicates, cancel)
    }

    /// Convert and store the records of a parsed batch
    ///
    /// Rows that never produced a record are not part of the sequence. Rows
    /// that failed validation are errored unless `store_invalid_rows` is set.
    pub fn process_rows(
        &self,
        rows: &[ParsedRow],
        account_id: &str,
        skip_duplicates: bool,
        cancel: &CancellationToken,
    ) -> ProcessingResult {
        let items: Vec<BatchItem<'_>> = rows
            .iter()
            .filter_map(|row| match row {
                ParsedRow::Accepted { record, .. } => Some(BatchItem::Record(record)),
                ParsedRow::Rejected {
                    record: Some(record),
                    reason: RowRejection::Invalid(error),
                    ..
                } => Some(if self.store_invalid_rows {
                    BatchItem::Record(record)
                } else {
                    BatchItem::Invalid(error)
                }),
                ParsedRow::Rejected { .. } => None,
            })
            .collect();

        self.run(&items, account_id, skip_duplicates, cancel)
    }

    fn run(
        &self,
        items: &[BatchItem<'_>],
        account_id: &str,
        skip_duplicates: bool,
        cancel: &CancellationToken,
    ) -> ProcessingResult {
        let total = items.len();
        let mut stats = BatchStats::new(total);
        let mut errors = Vec::new();
        let mut cancelled_at = None;
        let mut processed_keys: HashSet<String> = HashSet::new();

        info!(
            "Storing {} records for account {} (skip duplicates: {})",
            total, account_id, skip_duplicates
        );

        if let Some(pb) = &self.progress_bar {
            if total < PROGRESS_BAR_THRESHOLD {
                pb.set_draw_target(ProgressDrawTarget::hidden());
            }
            pb.set_length(total as u64);
            pb.set_position(0);
        }

        for (index, item) in items.iter().enumerate() {
            if cancel.is_cancelled() {
                stats.errored += total - index;
                errors.push(Error::cancelled(index).to_string());
                warn!(
                    "Processing cancelled at record {}; {} records left unprocessed",
                    index,
                    total - index
                );
                cancelled_at = Some(index);
                break;
            }

            if let Some(pb) = &self.progress_bar {
                pb.inc(1);
            }

            let number = index + 1;
            let record = match item {
                BatchItem::Record(record) => *record,
                BatchItem::Invalid(error) => {
                    stats.errored += 1;
                    errors.push(format!("Record {}: validation failed: {}", number, error));
                    continue;
                }
            };

            let key = record.dedup_key();
            if skip_duplicates && processed_keys.contains(&key) {
                stats.skipped += 1;
                debug!("Record {}: skipping duplicate {}", number, key);
                continue;
            }

            let simplified = match convert(record) {
                Ok(simplified) => simplified,
                Err(e) => {
                    stats.errored += 1;
                    errors.push(format!("Record {}: conversion failed: {}", number, e));
                    debug!("Record {}: conversion failed: {}", number, e);
                    continue;
                }
            };

            if let Err(e) = self.store.store(&StoredRecord::new(account_id, simplified)) {
                stats.errored += 1;
                errors.push(format!("Record {}: save failed: {}", number, e));
                warn!("Record {}: save failed: {}", number, e);
                continue;
            }

            processed_keys.insert(key);
            stats.saved += 1;
        }

        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("{} saved, {} errored", stats.saved, stats.errored));
        }

        info!("Store pass complete: {}", stats.summary());

        ProcessingResult {
            stats,
            errors,
            cancelled_at,
        }
    }

    /// Create a progress bar styled for record storage
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_message("Storing records");
        pb
    }
}
