//! Event store abstraction.

use std::fmt;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::error::StoreError;
use crate::event::{Event, PartitionKey};

/// Severity of a server log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerLogLevel {
    /// Routine operation.
    Info,
    /// Noteworthy but expected operation.
    Warn,
    /// A failed operation.
    Severe,
}

impl fmt::Display for ServerLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Severe => "SEVERE",
        })
    }
}

/// A lazy, single-pass sequence of stored lines.
///
/// Lines are read on demand from the underlying reader, without their
/// terminators. Retrieve the log again to start over.
pub struct LineSequence {
    lines: Lines<Box<dyn AsyncBufRead + Send + Unpin>>,
}

impl LineSequence {
    /// Wraps a buffered reader.
    pub fn new<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        let reader: Box<dyn AsyncBufRead + Send + Unpin> = Box::new(reader);
        Self {
            lines: reader.lines(),
        }
    }

    /// Builds a sequence over in-memory lines.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buffer = String::new();
        for line in lines {
            buffer.push_str(line.as_ref());
            buffer.push('\n');
        }
        Self::new(std::io::Cursor::new(buffer.into_bytes()))
    }

    /// Reads the next line, or `None` once the sequence is exhausted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the underlying read fails.
    pub async fn next_line(&mut self) -> Result<Option<String>, StoreError> {
        self.lines
            .next_line()
            .await
            .map_err(|e| StoreError::io("unable to read log line", e))
    }

    /// Drains the remaining lines into a vector.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if any read fails.
    pub async fn collect_lines(mut self) -> Result<Vec<String>, StoreError> {
        let mut collected = Vec::new();
        while let Some(line) = self.next_line().await? {
            collected.push(line);
        }
        Ok(collected)
    }
}

impl fmt::Debug for LineSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSequence").finish_non_exhaustive()
    }
}

/// Storage contract for partitioned event logs and the server log.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Validates `event` and appends it as one line to the end of its
    /// partition, creating the partition on first use. Returns the key the
    /// event was written under.
    async fn append(&self, event: &Event) -> Result<PartitionKey, StoreError>;

    /// Opens the partition at `key` for reading in append order.
    /// A key that was never written yields `StoreError::PartitionNotFound`.
    async fn retrieve_sequence(&self, key: &PartitionKey) -> Result<LineSequence, StoreError>;

    /// Opens the server log for reading in record order.
    async fn retrieve_server_log(&self) -> Result<LineSequence, StoreError>;

    /// Appends one operational record to the server log.
    async fn record(&self, level: ServerLogLevel, message: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_line_sequence_yields_lines_in_order_then_none() {
        let mut lines = LineSequence::from_lines(["first", "second"]);

        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("first"));
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("second"));
        assert_eq!(lines.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_reader_yields_no_lines() {
        let lines = LineSequence::new(std::io::Cursor::new(Vec::new()));

        assert!(lines.collect_lines().await.unwrap().is_empty());
    }

    #[test]
    fn test_server_log_level_labels() {
        assert_eq!(ServerLogLevel::Info.to_string(), "INFO");
        assert_eq!(ServerLogLevel::Warn.to_string(), "WARN");
        assert_eq!(ServerLogLevel::Severe.to_string(), "SEVERE");
    }
}
