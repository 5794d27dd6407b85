//! Batch-level service façade
//!
//! Ties the parser and the record processor together behind the four
//! calls a transport layer exposes: process a file, process inline text,
//! validate inline text, and report health.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::types::{
    HealthStatus, ProcessDataRequest, ProcessFileRequest, ProcessResponse, ValidateRequest,
    ValidationIssue, ValidationReport,
};
use crate::app::models::ParsedRow;
use crate::app::services::etc_csv_parser::{EtcCsvParser, ParseResult};
use crate::app::services::record_processor::{
    ProcessingResult, RecordProcessor, RecordStore, detect_duplicates,
};
use crate::config::ProcessorConfig;
use crate::constants::{SERVICE_NAME, SERVICE_VERSION, fields};
use crate::{Error, Result};

/// Service façade over parsing, validation and storage
#[derive(Debug)]
pub struct DataProcessorService {
    parser: EtcCsvParser,
    processor: RecordProcessor,
    config: ProcessorConfig,
    started_at: Instant,
}

impl DataProcessorService {
    /// Create a service with default configuration
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let config = ProcessorConfig::default();
        Self {
            parser: EtcCsvParser::from_config(&config),
            processor: RecordProcessor::from_config(store, &config),
            config,
            started_at: Instant::now(),
        }
    }

    /// Create a service with validated configuration
    pub fn with_config(store: Arc<dyn RecordStore>, config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            parser: EtcCsvParser::from_config(&config),
            processor: RecordProcessor::from_config(store, &config),
            config,
            started_at: Instant::now(),
        })
    }

    /// Report store progress on the given bar
    pub fn with_progress_bar(mut self, progress_bar: ProgressBar) -> Self {
        self.processor = self.processor.with_progress_bar(progress_bar);
        self
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Parse a legacy-encoded file and store its records
    pub fn process_csv_file(
        &self,
        request: &ProcessFileRequest,
        cancel: &CancellationToken,
    ) -> Result<ProcessResponse> {
        let parsed = self.parser.parse_file(&request.csv_file_path)?;
        let result = self.store_parsed(
            &parsed,
            &request.account_id,
            request.skip_duplicates,
            cancel,
        )?;

        Ok(ProcessResponse {
            success: result.is_success(),
            message: format!("Processed {} records from file", result.stats.total),
            stats: result.stats,
            errors: result.errors,
        })
    }

    /// Parse inline UTF-8 text and store its records
    pub fn process_csv_data(
        &self,
        request: &ProcessDataRequest,
        cancel: &CancellationToken,
    ) -> Result<ProcessResponse> {
        let parsed = self.parser.parse_str(&request.csv_data)?;
        let result = self.store_parsed(
            &parsed,
            &request.account_id,
            request.skip_duplicates,
            cancel,
        )?;

        Ok(ProcessResponse {
            success: result.is_success(),
            message: format!("Processed {} records", result.stats.total),
            stats: result.stats,
            errors: result.errors,
        })
    }

    /// Validate inline text without storing anything
    ///
    /// A structural parse failure is reported as a single issue on line 0.
    pub fn validate_csv_data(&self, request: &ValidateRequest) -> ValidationReport {
        match self.parser.parse_str(&request.csv_data) {
            Ok(parsed) => build_report(&parsed),
            Err(e) => {
                warn!("Validation input could not be parsed: {}", e);
                ValidationReport {
                    is_valid: false,
                    errors: vec![ValidationIssue {
                        line_number: 0,
                        field: fields::CSV.to_string(),
                        message: e.to_string(),
                        record_data: String::new(),
                    }],
                    duplicate_count: 0,
                    total_records: 0,
                }
            }
        }
    }

    /// Report liveness, version and uptime
    pub fn health_check(&self) -> HealthStatus {
        let mut details = HashMap::new();
        details.insert("service".to_string(), SERVICE_NAME.to_string());
        details.insert(
            "uptime".to_string(),
            format!("{}s", self.started_at.elapsed().as_secs()),
        );

        HealthStatus {
            status: "healthy".to_string(),
            version: SERVICE_VERSION.to_string(),
            timestamp: chrono::Utc::now().timestamp(),
            details,
        }
    }

    fn store_parsed(
        &self,
        parsed: &ParseResult,
        account_id: &str,
        skip_duplicates: bool,
        cancel: &CancellationToken,
    ) -> Result<ProcessingResult> {
        let rows = parsed.rows.len();
        if !self.config.batch_size_allowed(rows) {
            return Err(Error::configuration(format!(
                "batch of {} rows exceeds the limit of {}",
                rows, self.config.max_batch_size
            )));
        }

        let result = self
            .processor
            .process_rows(&parsed.rows, account_id, skip_duplicates, cancel);
        info!("Batch for account {}: {}", account_id, result.summary());
        Ok(result)
    }
}

fn build_report(parsed: &ParseResult) -> ValidationReport {
    let errors: Vec<ValidationIssue> = parsed
        .rows
        .iter()
        .filter_map(|row| match row {
            ParsedRow::Accepted { .. } => None,
            ParsedRow::Rejected {
                line,
                record,
                reason,
            } => Some(ValidationIssue {
                line_number: *line,
                field: reason.field().to_string(),
                message: reason.to_string(),
                record_data: record.as_ref().map(|r| r.summary()).unwrap_or_default(),
            }),
        })
        .collect();

    let duplicates = detect_duplicates(parsed.records());

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        duplicate_count: duplicates.duplicate_count,
        total_records: parsed.record_count(),
    }
}
