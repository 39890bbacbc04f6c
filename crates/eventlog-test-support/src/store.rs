//! Test stores — in-memory `EventStore` implementations for tests.

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use eventlog_core::error::StoreError;
use eventlog_core::event::{Event, PartitionKey};
use eventlog_core::store::{EventStore, LineSequence, ServerLogLevel};

/// An in-memory event store that keeps every appended line and every server
/// log record so tests can inspect them.
#[derive(Debug, Default)]
pub struct RecordingEventStore {
    partitions: Mutex<HashMap<PartitionKey, Vec<String>>>,
    records: Mutex<Vec<(ServerLogLevel, String)>>,
}

impl RecordingEventStore {
    /// Create an empty recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the lines stored under `key`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn partition(&self, key: &PartitionKey) -> Option<Vec<String>> {
        self.partitions.lock().unwrap().get(key).cloned()
    }

    /// Returns a snapshot of all server log records.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn records(&self) -> Vec<(ServerLogLevel, String)> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventStore for RecordingEventStore {
    async fn append(&self, event: &Event) -> Result<PartitionKey, StoreError> {
        let key = event.validate()?;
        self.partitions
            .lock()
            .unwrap()
            .entry(key.clone())
            .or_default()
            .push(event.to_string());
        Ok(key)
    }

    async fn retrieve_sequence(&self, key: &PartitionKey) -> Result<LineSequence, StoreError> {
        self.partition(key)
            .map(LineSequence::from_lines)
            .ok_or_else(|| StoreError::PartitionNotFound(key.clone()))
    }

    async fn retrieve_server_log(&self) -> Result<LineSequence, StoreError> {
        let records = self.records();
        if records.is_empty() {
            return Err(StoreError::ServerLogNotFound);
        }
        Ok(LineSequence::from_lines(
            records
                .iter()
                .map(|(level, message)| format!("[{level}] {message}")),
        ))
    }

    async fn record(&self, level: ServerLogLevel, message: &str) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .push((level, message.to_owned()));
        Ok(())
    }
}

/// An event store whose every operation fails with an I/O error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingEventStore;

fn unavailable() -> StoreError {
    StoreError::io(
        "storage unavailable",
        io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
    )
}

#[async_trait]
impl EventStore for FailingEventStore {
    async fn append(&self, _event: &Event) -> Result<PartitionKey, StoreError> {
        Err(unavailable())
    }

    async fn retrieve_sequence(&self, _key: &PartitionKey) -> Result<LineSequence, StoreError> {
        Err(unavailable())
    }

    async fn retrieve_server_log(&self) -> Result<LineSequence, StoreError> {
        Err(unavailable())
    }

    async fn record(&self, _level: ServerLogLevel, _message: &str) -> Result<(), StoreError> {
        Err(unavailable())
    }
}
