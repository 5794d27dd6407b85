//! Data models for ETC usage processing
//!
//! This module contains the core data structures for representing toll usage
//! rows after normalization, the simplified shape handed to storage, per-row
//! parse outcomes and batch counters.

use crate::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Normalized Usage Record
// =============================================================================

/// One toll usage row in normalized form
///
/// Dates and times are kept as the text found in the export; they are only
/// interpreted by validation and conversion. Text fields are empty when the
/// source row had no such column. Numeric fields default to 0 when the source
/// cell is absent or unparsable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Entry date text, `YY/MM/DD` or `YYYY/MM/DD`
    pub entry_date: String,

    /// Entry time text
    pub entry_time: String,

    /// Exit date text, `YY/MM/DD` or `YYYY/MM/DD`
    pub exit_date: String,

    /// Exit time text
    pub exit_time: String,

    /// Entry interchange name
    pub entry_location: String,

    /// Exit interchange name
    pub exit_location: String,

    /// Route description
    pub route_info: String,

    /// Fee actually charged
    pub toll_amount: i64,

    /// Fee before discount
    pub base_amount: i64,

    /// Discount applied (usually negative)
    pub discount_amount: i64,

    /// Mileage points
    pub mileage: i64,

    /// Vehicle class code
    pub vehicle_class: i64,

    /// Vehicle registration number
    pub vehicle_number: String,

    /// ETC card number (usually masked)
    pub card_identifier: String,

    /// Free-form remarks
    pub notes: String,
}

impl UsageRecord {
    /// Composite identity used for duplicate detection and skipping
    ///
    /// Two rows describing the same trip on the same card produce the same key.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}_{}",
            self.entry_date,
            self.entry_time,
            self.exit_date,
            self.exit_time,
            self.toll_amount,
            self.card_identifier
        )
    }

    /// Compact single-line rendering used in validation reports
    pub fn summary(&self) -> String {
        format!(
            "{} {} -> {} {} | {} -> {} | fee={} base={} discount={} | class={} | card={}",
            self.entry_date,
            self.entry_time,
            self.exit_date,
            self.exit_time,
            self.entry_location,
            self.exit_location,
            self.toll_amount,
            self.base_amount,
            self.discount_amount,
            self.vehicle_class,
            self.card_identifier
        )
    }
}

// =============================================================================
// Simplified Record
// =============================================================================

/// Storage-facing shape of an accepted usage record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedRecord {
    /// Exit date, or entry date when the exit date is unusable
    pub resolved_date: NaiveDate,
    pub entry_location: String,
    pub exit_location: String,
    pub route_info: String,

    /// e.g. `Class 2`
    pub vehicle_label: String,
    pub card_identifier: String,

    /// Charged fee (or base fee when the charged fee is zero), never negative
    pub amount: u64,
}

// =============================================================================
// Per-row Parse Outcome
// =============================================================================

/// Why a parsed row was not accepted
#[derive(Debug, thiserror::Error)]
pub enum RowRejection {
    /// Positional row with fewer cells than the fixed layout needs
    #[error("row has {found} fields, at least {required} required")]
    TooFewFields { found: usize, required: usize },

    /// Row mapped to a record that failed validation
    #[error(transparent)]
    Invalid(Error),
}

impl RowRejection {
    /// Field name associated with the rejection, for reports
    pub fn field(&self) -> &str {
        match self {
            Self::TooFewFields { .. } => crate::constants::fields::ROW,
            Self::Invalid(error) => error.field().unwrap_or(""),
        }
    }
}

/// Outcome of mapping and validating one CSV row
///
/// `line` is the 1-based physical row number in the source, counting the
/// header row when one was present.
#[derive(Debug)]
pub enum ParsedRow {
    /// Row mapped to a record that passed validation
    Accepted { line: usize, record: UsageRecord },

    /// Row that was dropped or failed validation
    Rejected {
        line: usize,
        record: Option<UsageRecord>,
        reason: RowRejection,
    },
}

impl ParsedRow {
    /// Source line number of the row
    pub fn line(&self) -> usize {
        match self {
            Self::Accepted { line, .. } | Self::Rejected { line, .. } => *line,
        }
    }

    /// The mapped record, if the row produced one
    pub fn record(&self) -> Option<&UsageRecord> {
        match self {
            Self::Accepted { record, .. } => Some(record),
            Self::Rejected { record, .. } => record.as_ref(),
        }
    }

    /// Rejection reason, if the row was rejected
    pub fn rejection(&self) -> Option<&RowRejection> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected { reason, .. } => Some(reason),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

// =============================================================================
// Batch Counters
// =============================================================================

/// Counters for one store pass over a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Records in the batch
    pub total: usize,
    /// Records handed to storage successfully
    pub saved: usize,
    /// Duplicates skipped
    pub skipped: usize,
    /// Records that failed validation, conversion, storage or were cancelled
    pub errored: usize,
}

impl BatchStats {
    /// Create counters for a batch of `total` records
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Records that have been accounted for so far
    pub fn processed(&self) -> usize {
        self.saved + self.skipped + self.errored
    }

    /// Percentage of records that were saved
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.saved as f64 / self.total as f64) * 100.0
        }
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "{} records: {} saved, {} skipped, {} errored ({:.1}% saved)",
            self.total,
            self.saved,
            self.skipped,
            self.errored,
            self.success_rate()
        )
    }
}
