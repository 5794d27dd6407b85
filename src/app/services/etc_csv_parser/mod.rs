//! ETC CSV parser for toll usage exports
//!
//! This module turns heterogeneous ETC usage exports into normalized
//! [`UsageRecord`](crate::app::models::UsageRecord)s, tagging every data row
//! with an explicit outcome instead of failing the batch on one bad row.
//!
//! ## Architecture
//!
//! - [`parser`] - Batch orchestration: tokenizing, header detection, row loop
//! - [`encoding`] - Legacy byte encoding to UTF-8 text
//! - [`header`] - Header row detection and tolerant column name lookup
//! - [`row_mapper`] - Header-based and positional row mapping strategies
//! - [`validator`] - Per-record admissibility checks
//! - [`field_parsers`] - Amount, vehicle class and date normalization
//! - [`stats`] - Parse statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use etc_data_processor::app::services::etc_csv_parser::EtcCsvParser;
//!
//! # fn example() -> etc_data_processor::Result<()> {
//! let parser = EtcCsvParser::new();
//! let result = parser.parse_file(std::path::Path::new("meisai.csv"))?;
//!
//! println!("Parsed {} rows, {} accepted",
//!          result.stats.total_rows,
//!          result.stats.accepted);
//! # Ok(())
//! # }
//! ```

pub mod encoding;
pub mod field_parsers;
pub mod header;
pub mod parser;
pub mod row_mapper;
pub mod stats;
pub mod validator;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use encoding::decode_bytes;
pub use field_parsers::{parse_amount, parse_date};
pub use header::HeaderMap;
pub use parser::EtcCsvParser;
pub use row_mapper::{HeaderRowMapper, PositionalRowMapper, RowMapper};
pub use stats::{ParseResult, ParseStats};
pub use validator::validate_record;
