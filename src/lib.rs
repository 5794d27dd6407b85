//! ETC Data Processor Library
//!
//! A Rust library for ingesting ETC (electronic toll collection) usage exports
//! supplied as CSV files or inline text.
//!
//! This library provides tools for:
//! - Decoding legacy Shift_JIS exports into canonical UTF-8 text
//! - Detecting header rows and resolving historical header spellings
//! - Mapping rows positionally when no header row is present
//! - Validating records and tagging every row with an explicit outcome
//! - Converting records to the simplified storage shape
//! - Detecting and skipping duplicate trips
//! - Storing accepted records with per-record diagnostics and cancellation

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod data_processor;
        pub mod etc_csv_parser;
        pub mod record_processor;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{BatchStats, ParsedRow, RowRejection, SimplifiedRecord, UsageRecord};
pub use config::ProcessorConfig;

/// Result type alias for the ETC data processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ETC ingestion operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The input produced no CSV rows at all
    #[error("CSV file is empty")]
    EmptyInput,

    /// Rows exist but none remain after the header / start offset
    #[error("no data records found")]
    NoDataRows,

    /// Amount or class text is not an integer
    #[error("invalid numeric value '{value}': {source}")]
    NumericFormat {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Date text is not a three-part slash-delimited date
    #[error("invalid date format: {value} ({reason})")]
    DateFormat { value: String, reason: String },

    /// A required field is empty
    #[error("{field} cannot be empty")]
    MissingField { field: String },

    /// A date field failed normalization during validation
    #[error("invalid {field}: {source}")]
    InvalidDate {
        field: String,
        #[source]
        source: Box<Error>,
    },

    /// Neither the exit date nor the entry date could be resolved
    #[error("no usable date: exit date '{exit_date}' and entry date '{entry_date}' are both invalid")]
    UnresolvableDate {
        exit_date: String,
        entry_date: String,
    },

    /// The storage collaborator rejected a record
    #[error("storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Cooperative cancellation stopped a batch
    #[error("Processing cancelled at record {index}")]
    Cancelled { index: usize },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV tokenizer error
    #[error("failed to read CSV: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Text encoding error
    #[error("encoding error: {message}")]
    Encoding { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON serialization error
    #[error("serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an empty input error
    pub fn empty_input() -> Self {
        Self::EmptyInput
    }

    /// Create a no data rows error
    pub fn no_data_rows() -> Self {
        Self::NoDataRows
    }

    /// Create a numeric format error
    pub fn numeric_format(value: impl Into<String>, source: std::num::ParseIntError) -> Self {
        Self::NumericFormat {
            value: value.into(),
            source,
        }
    }

    /// Create a date format error
    pub fn date_format(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DateFormat {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Wrap a date normalization failure for a named field
    pub fn invalid_date(field: impl Into<String>, source: Error) -> Self {
        Self::InvalidDate {
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// Create an unresolvable date error
    pub fn unresolvable_date(exit_date: impl Into<String>, entry_date: impl Into<String>) -> Self {
        Self::UnresolvableDate {
            exit_date: exit_date.into(),
            entry_date: entry_date.into(),
        }
    }

    /// Create a storage error without an underlying cause
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error from an underlying cause
    pub fn storage_with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(index: usize) -> Self {
        Self::Cancelled { index }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create an encoding error
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Name of the record field this error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } | Self::InvalidDate { field, .. } => Some(field),
            _ => None,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: error.to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
