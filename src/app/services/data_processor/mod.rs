//! Data processor service
//!
//! Entry points for a transport layer: process an export file, process
//! inline export text, validate inline text, and health.
//!
//! Structural failures (empty input, no data rows, unreadable stream or
//! missing file) are returned as `Err`. Everything that goes wrong with an
//! individual record is reported inside a success-shaped response.

pub mod service;
pub mod types;

#[cfg(test)]
pub mod tests;

pub use service::DataProcessorService;
pub use types::{
    HealthStatus, ProcessDataRequest, ProcessFileRequest, ProcessResponse, ValidateRequest,
    ValidationIssue, ValidationReport,
};
