//! Record processing module for parsed ETC batches
//!
//! This module takes the per-row outcomes produced by the CSV parser and
//! turns them into stored records with per-record diagnostics.
//!
//! # Architecture
//!
//! - [`processor`] - Main RecordProcessor struct and the store pass
//! - [`conversion`] - Date and amount fallback policy for the storage shape
//! - [`deduplication`] - Duplicate trip detection
//! - [`storage`] - The storage collaborator trait and bundled stores
//! - [`stats`] - Processing result structures
//!
//! # Store Pass
//!
//! Records are processed strictly in input order. For each record:
//!
//! 1. **Cancellation**: a cancelled token stops the pass; the remaining records are errored
//! 2. **Deduplication**: with skipping enabled, a trip already saved in this pass is skipped
//! 3. **Conversion**: the record is reduced to one date and one non-negative amount
//! 4. **Storage**: the converted record is handed to the [`RecordStore`]
//!
//! A failure in steps 3 or 4 is counted and described, and the pass moves on.

pub mod conversion;
pub mod deduplication;
pub mod processor;
pub mod stats;
pub mod storage;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use conversion::convert;
pub use deduplication::{DuplicateSummary, are_duplicates, detect_duplicates};
pub use processor::RecordProcessor;
pub use stats::ProcessingResult;
pub use storage::{JsonLinesStore, MemoryStore, RecordStore, StoredRecord};
