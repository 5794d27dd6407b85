//! Core ETC CSV parser implementation
//!
//! This module provides the batch parser orchestration: decoding, tokenizing,
//! header detection, row mapping and per-row validation.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info, warn};

use super::encoding::{decode_bytes, strip_bom};
use super::row_mapper::{RowMapper, select_mapper};
use super::stats::{ParseResult, ParseStats};
use super::validator::validate_record;
use crate::app::models::{ParsedRow, RowRejection};
use crate::config::ProcessorConfig;
use crate::constants::DEFAULT_INPUT_ENCODING;
use crate::{Error, Result};

/// Parser for ETC usage exports
///
/// A parse call never fails because of a single bad row. Only structural
/// problems abort the batch:
/// - no rows at all ([`Error::EmptyInput`])
/// - nothing past the header ([`Error::NoDataRows`])
/// - an unreadable token stream ([`Error::CsvParsing`])
#[derive(Debug, Clone)]
pub struct EtcCsvParser {
    encoding: String,
}

impl Default for EtcCsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EtcCsvParser {
    /// Create a parser that decodes files as Shift_JIS
    pub fn new() -> Self {
        Self::with_encoding(DEFAULT_INPUT_ENCODING)
    }

    /// Create a parser that decodes files with the given encoding label
    pub fn with_encoding(label: impl Into<String>) -> Self {
        Self {
            encoding: label.into(),
        }
    }

    pub fn from_config(config: &ProcessorConfig) -> Self {
        Self::with_encoding(config.input_encoding.clone())
    }

    /// Encoding label used for file input
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Parse a legacy-encoded export file
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        info!("Parsing ETC CSV file: {}", path.display());

        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;

        self.parse_bytes(&bytes, &self.encoding)
    }

    /// Decode bytes with the given encoding label and parse them
    pub fn parse_bytes(&self, bytes: &[u8], encoding: &str) -> Result<ParseResult> {
        let text = decode_bytes(bytes, encoding)?;
        self.parse_str(&text)
    }

    /// Parse canonical UTF-8 text
    pub fn parse_str(&self, text: &str) -> Result<ParseResult> {
        self.parse_reader(strip_bom(text).as_bytes())
    }

    /// Parse a UTF-8 byte stream
    ///
    /// Invalid UTF-8 in the stream is a tokenizer error for the whole batch.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<ParseResult> {
        let rows = read_rows(reader)?;
        self.parse_rows(&rows)
    }

    /// Classify the first row and process everything after the header
    pub fn parse_rows(&self, rows: &[StringRecord]) -> Result<ParseResult> {
        let first_row = rows.first().ok_or_else(Error::empty_input)?;

        let (mapper, has_header) = select_mapper(first_row);
        debug!(
            "Using {} row mapping ({} rows read)",
            mapper.name(),
            rows.len()
        );

        let start_index = usize::from(has_header);
        self.process_rows(rows, start_index, mapper.as_ref())
    }

    /// Map and validate every row from `start_index` on
    ///
    /// Rows before `start_index` are header rows. Each remaining row yields
    /// exactly one [`ParsedRow`], in input order.
    pub fn process_rows(
        &self,
        rows: &[StringRecord],
        start_index: usize,
        mapper: &dyn RowMapper,
    ) -> Result<ParseResult> {
        ensure_data_rows(rows, start_index)?;

        let mut stats = ParseStats::new();
        let mut parsed = Vec::with_capacity(rows.len() - start_index);

        for (index, row) in rows.iter().enumerate().skip(start_index) {
            let line = index + 1;
            stats.total_rows += 1;

            let outcome = match mapper.map_row(row) {
                Ok(record) => match validate_record(&record) {
                    Ok(()) => {
                        stats.accepted += 1;
                        ParsedRow::Accepted { line, record }
                    }
                    Err(e) => {
                        stats.invalid += 1;
                        stats.errors.push(format!("Line {}: {}", line, e));
                        debug!("Line {} failed validation: {}", line, e);
                        ParsedRow::Rejected {
                            line,
                            record: Some(record),
                            reason: RowRejection::Invalid(e),
                        }
                    }
                },
                Err(reason) => {
                    stats.dropped += 1;
                    stats.errors.push(format!("Line {}: {}", line, reason));
                    debug!("Line {} dropped: {}", line, reason);
                    ParsedRow::Rejected {
                        line,
                        record: None,
                        reason,
                    }
                }
            };

            parsed.push(outcome);
        }

        if stats.dropped > 0 {
            warn!(
                "Dropped {} rows too short for the positional layout",
                stats.dropped
            );
        }
        info!(
            "Parsed {} rows: {} accepted, {} invalid, {} dropped",
            stats.total_rows, stats.accepted, stats.invalid, stats.dropped
        );

        Ok(ParseResult {
            rows: parsed,
            stats,
            has_header: start_index > 0,
        })
    }
}

/// Tokenize a CSV stream into rows of variable length
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<StringRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    csv_reader
        .records()
        .enumerate()
        .map(|(index, result)| {
            result.map_err(|e| {
                Error::csv_parsing(format!("failed to read row {}: {}", index + 1, e), Some(e))
            })
        })
        .collect()
}

/// Fail with [`Error::NoDataRows`] unless a row exists at `start_index`
///
/// An entirely empty row set is [`Error::EmptyInput`].
pub fn ensure_data_rows(rows: &[StringRecord], start_index: usize) -> Result<()> {
    if rows.is_empty() {
        return Err(Error::empty_input());
    }
    if rows.len() <= start_index {
        return Err(Error::no_data_rows());
    }
    Ok(())
}
