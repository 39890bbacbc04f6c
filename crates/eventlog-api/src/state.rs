//! Shared application state.

use std::sync::Arc;

use eventlog_core::store::{EventStore, ServerLogLevel};
use tracing::error;

use crate::error::ApiError;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage for event partitions and the server log.
    pub event_store: Arc<dyn EventStore>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(event_store: Arc<dyn EventStore>) -> Self {
        Self { event_store }
    }

    /// Writes a server log record. A failed write is reported through
    /// tracing and never fails the request being served.
    pub async fn record(&self, level: ServerLogLevel, message: &str) {
        if let Err(e) = self.event_store.record(level, message).await {
            error!(error = %e, "failed to write server log");
        }
    }

    /// Records `err` in the server log at SEVERE and returns it.
    pub async fn reject<T>(&self, err: impl Into<ApiError>) -> Result<T, ApiError> {
        let err = err.into();
        self.record(ServerLogLevel::Severe, &err.to_string()).await;
        Err(err)
    }
}
