//! Request and response shapes of the data processor service

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app::models::BatchStats;

/// Process an export file from the local filesystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessFileRequest {
    pub csv_file_path: PathBuf,
    pub account_id: String,
    #[serde(default)]
    pub skip_duplicates: bool,
}

/// Process export text supplied inline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDataRequest {
    pub csv_data: String,
    pub account_id: String,
    #[serde(default)]
    pub skip_duplicates: bool,
}

/// Validate export text without storing anything
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub csv_data: String,
    #[serde(default)]
    pub account_id: String,
}

/// Outcome of a processing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// True when at least one record was saved
    pub success: bool,
    pub message: String,
    pub stats: BatchStats,
    /// Per-record diagnostics, ordered by record index
    pub errors: Vec<String>,
}

/// One problem found by validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Physical CSV line; 0 when the input could not be parsed at all
    pub line_number: usize,
    /// Offending field (`card_number`, `entry_date`, `exit_date`, `row`, `csv`)
    pub field: String,
    pub message: String,
    /// Compact rendering of the mapped record, empty when there is none
    pub record_data: String,
}

/// Result of a validate-only call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub duplicate_count: usize,
    /// Rows that produced a record
    pub total_records: usize,
}

/// Liveness report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    /// Unix timestamp in seconds
    pub timestamp: i64,
    pub details: HashMap<String, String>,
}
