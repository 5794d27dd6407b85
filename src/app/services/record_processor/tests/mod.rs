//! Tests for the record processor module
//!
//! This module provides unit tests for all record processing components,
//! plus fixtures shared between them.

pub mod conversion_tests;

// Test helper functions and fixtures
use crate::app::models::UsageRecord;
use crate::app::services::record_processor::{RecordStore, StoredRecord};
use crate::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

/// Create a valid usage record for the given card
pub fn create_test_record(card: &str) -> UsageRecord {
    UsageRecord {
        entry_date: "25/09/01".to_string(),
        entry_time: "08:00".to_string(),
        exit_date: "25/09/01".to_string(),
        exit_time: "09:00".to_string(),
        entry_location: "東京".to_string(),
        exit_location: "横浜".to_string(),
        route_info: "首都高".to_string(),
        toll_amount: 1200,
        base_amount: 1500,
        discount_amount: -300,
        vehicle_class: 2,
        vehicle_number: "品川300あ1234".to_string(),
        card_identifier: card.to_string(),
        ..UsageRecord::default()
    }
}

/// Create `count` records describing distinct trips
pub fn create_distinct_records(count: usize) -> Vec<UsageRecord> {
    (0..count)
        .map(|i| UsageRecord {
            entry_time: format!("{:02}:00", i % 24),
            toll_amount: 1000 + i as i64,
            ..create_test_record("********12345678")
        })
        .collect()
}

/// Store that fails for one card identifier and counts every call
#[derive(Debug, Default)]
pub struct FailingStore {
    pub failing_card: String,
    pub calls: AtomicUsize,
    pub stored: AtomicUsize,
}

impl FailingStore {
    pub fn failing_on(card: &str) -> Self {
        Self {
            failing_card: card.to_string(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> usize {
        self.stored.load(Ordering::SeqCst)
    }
}

impl RecordStore for FailingStore {
    fn store(&self, record: &StoredRecord) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if record.record.card_identifier == self.failing_card {
            return Err(Error::storage("database unavailable"));
        }
        self.stored.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Store that trips a cancellation token while handling its Nth call
#[derive(Debug)]
pub struct CancellingStore {
    pub cancel_on_call: usize,
    pub token: CancellationToken,
    pub calls: AtomicUsize,
}

impl CancellingStore {
    pub fn new(cancel_on_call: usize, token: CancellationToken) -> Self {
        Self {
            cancel_on_call,
            token,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RecordStore for CancellingStore {
    fn store(&self, _record: &StoredRecord) -> Result<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.cancel_on_call {
            self.token.cancel();
        }
        Ok(())
    }
}
