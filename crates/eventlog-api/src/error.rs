//! Event Logger — API error types.

use axum::http::StatusCode;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use eventlog_core::error::StoreError;
use thiserror::Error;

/// Startup errors for the API server. All of them are fatal.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The log root could not be prepared or the startup records written.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Request-level failure, rendered as a plain-text `ERROR:` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The storage layer rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body could not be decoded into an event.
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl ApiError {
    /// HTTP status the error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody(_) | Self::Store(StoreError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Store(StoreError::PartitionNotFound(_) | StoreError::ServerLogNotFound) => {
                StatusCode::NOT_FOUND
            }
            Self::Store(StoreError::Io { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("ERROR: {self}\n"),
        )
            .into_response()
    }
}
