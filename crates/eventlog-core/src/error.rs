//! Error types for event validation and storage.

use std::io;

use thiserror::Error;

use crate::event::PartitionKey;

/// Rejection of an event or partition key before it reaches storage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A partition key component cannot be used as a path segment.
    #[error("invalid {field} {value:?}: only ASCII letters, digits, '-', '_' and '.' are allowed")]
    UnsafePathComponent {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A field contains a line break, which would split the stored record.
    #[error("field {0} must not contain line breaks")]
    LineBreak(&'static str),

    /// The service name collides with a file the store keeps in the log root.
    #[error("service_name {0:?} is reserved")]
    ReservedServiceName(String),
}

/// Top-level storage error type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The event or key was rejected before touching storage.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No partition has been written at the requested key.
    #[error("no log file found for {0}")]
    PartitionNotFound(PartitionKey),

    /// The server log has not been created yet.
    #[error("no log file found for the Event Logger")]
    ServerLogNotFound,

    /// A directory or file could not be created, opened, written or read.
    #[error("{operation}: {source}")]
    Io {
        /// What the store was doing when the failure occurred.
        operation: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Wraps an I/O error with a description of the failed operation.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Returns `true` when the error means the requested log does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PartitionNotFound(_) | Self::ServerLogNotFound)
    }
}
