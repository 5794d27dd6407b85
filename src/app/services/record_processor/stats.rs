//! Processing result structures for the store pass
//!
//! This module pairs the batch counters with the ordered per-record
//! diagnostics produced while storing a batch.

use serde::{Deserialize, Serialize};

use crate::app::models::BatchStats;

/// Outcome of one store pass over a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Final counters
    pub stats: BatchStats,

    /// Human-readable diagnostics, ordered by record index
    pub errors: Vec<String>,

    /// Index of the first record left unprocessed by cancellation
    pub cancelled_at: Option<usize>,
}

impl ProcessingResult {
    pub fn new(stats: BatchStats, errors: Vec<String>) -> Self {
        Self {
            stats,
            errors,
            cancelled_at: None,
        }
    }

    /// Whether at least one record was stored
    pub fn is_success(&self) -> bool {
        self.stats.saved > 0
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled_at.is_some()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        match self.cancelled_at {
            Some(index) => format!("{} (cancelled at record {})", self.stats.summary(), index),
            None => self.stats.summary(),
        }
    }
}
