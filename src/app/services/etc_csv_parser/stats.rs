//! Parsing statistics and result structures for ETC CSV processing
//!
//! This module provides types for tracking per-batch row outcomes and
//! organizing parsed rows for downstream processing.

use crate::app::models::{ParsedRow, UsageRecord};

/// Parsing result with per-row outcomes and basic statistics
#[derive(Debug)]
pub struct ParseResult {
    /// One entry per data row, in input order
    pub rows: Vec<ParsedRow>,

    /// Basic parsing statistics
    pub stats: ParseStats,

    /// Whether the first row was consumed as a header
    pub has_header: bool,
}

impl ParseResult {
    /// Every record the parser produced, valid or not, in input order
    pub fn records(&self) -> impl Iterator<Item = &UsageRecord> {
        self.rows.iter().filter_map(ParsedRow::record)
    }

    /// Records that passed validation
    pub fn accepted_records(&self) -> impl Iterator<Item = &UsageRecord> {
        self.rows.iter().filter_map(|row| match row {
            ParsedRow::Accepted { record, .. } => Some(record),
            ParsedRow::Rejected { .. } => None,
        })
    }

    /// Consume the result, keeping every produced record
    pub fn into_records(self) -> Vec<UsageRecord> {
        self.rows
            .into_iter()
            .filter_map(|row| match row {
                ParsedRow::Accepted { record, .. } => Some(record),
                ParsedRow::Rejected { record, .. } => record,
            })
            .collect()
    }

    /// Number of rows that produced a record
    pub fn record_count(&self) -> usize {
        self.records().count()
    }
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Data rows examined (header excluded)
    pub total_rows: usize,

    /// Rows that produced a valid record
    pub accepted: usize,

    /// Rows that produced a record failing validation
    pub invalid: usize,

    /// Rows dropped because they could not be mapped
    pub dropped: usize,

    /// Human-readable notes on rejected rows
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate acceptance rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.accepted as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Rows that produced a record, valid or not
    pub fn records_produced(&self) -> usize {
        self.accepted + self.invalid
    }
}
