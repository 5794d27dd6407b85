//! Storage collaborator for converted records
//!
//! The processor only needs "store one record; succeed or fail". Two stores
//! ship with the crate: an in-memory one for tests and dry runs, and an
//! append-only JSON lines file used by the CLI.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::models::SimplifiedRecord;
use crate::{Error, Result};

/// A converted record tagged with the account it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub account_id: String,

    #[serde(flatten)]
    pub record: SimplifiedRecord,
}

impl StoredRecord {
    pub fn new(account_id: impl Into<String>, record: SimplifiedRecord) -> Self {
        Self {
            account_id: account_id.into(),
            record,
        }
    }
}

/// Persists one record at a time
///
/// Each call is an independent attempt; implementations must not assume
/// any batching or transaction around a sequence of calls.
pub trait RecordStore: Send + Sync {
    /// Store one record, failing with [`Error::Storage`]
    fn store(&self, record: &StoredRecord) -> Result<()>;
}

/// Mutex-guarded in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StoredRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far, in store order
    pub fn records(&self) -> Vec<StoredRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn store(&self, record: &StoredRecord) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| Error::storage("memory store lock poisoned"))?;
        records.push(record.clone());
        Ok(())
    }
}

/// Appends one JSON object per line to a file
///
/// The file (and its parent directory) is created on the first stored
/// record, so a batch that fails before storing leaves nothing behind.
#[derive(Debug)]
pub struct JsonLinesStore {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl JsonLinesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_writer(&self) -> std::io::Result<BufWriter<File>> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        debug!("Appending records to {}", self.path.display());
        Ok(BufWriter::new(file))
    }
}

impl RecordStore for JsonLinesStore {
    fn store(&self, record: &StoredRecord) -> Result<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| Error::storage_with_source("failed to serialize record", e))?;

        let mut guard = self
            .writer
            .lock()
            .map_err(|_| Error::storage("output file lock poisoned"))?;

        if guard.is_none() {
            let writer = self.open_writer().map_err(|e| {
                Error::storage_with_source(format!("failed to open {}", self.path.display()), e)
            })?;
            *guard = Some(writer);
        }
        let Some(writer) = guard.as_mut() else {
            return Err(Error::storage("output file unavailable"));
        };

        writeln!(writer, "{}", line)
            .and_then(|()| writer.flush())
            .map_err(|e| {
                Error::storage_with_source(format!("failed to write {}", self.path.display()), e)
            })
    }
}
