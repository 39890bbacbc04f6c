//! Log retrieval endpoints: the server log and individual partitions.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use eventlog_core::error::StoreError;
use eventlog_core::event::PartitionKey;
use eventlog_core::store::{LineSequence, ServerLogLevel};
use futures::stream;
use tracing::{error, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Streams the remaining lines as the response body, each terminated by
/// `\n`. A read failure after the headers are sent aborts the body.
fn stream_lines(lines: LineSequence) -> Response {
    let chunks = stream::try_unfold(lines, |mut lines| async move {
        match lines.next_line().await {
            Ok(Some(line)) => Ok(Some((format!("{line}\n"), lines))),
            Ok(None) => Ok(None),
            Err(e) => {
                error!(error = %e, "log stream interrupted");
                Err(e)
            }
        }
    });
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(chunks),
    )
        .into_response()
}

/// GET /logs
async fn server_log(State(state): State<AppState>) -> Result<Response, ApiError> {
    state
        .record(ServerLogLevel::Warn, "Served request for server logs")
        .await;

    match state.event_store.retrieve_server_log().await {
        Ok(lines) => Ok(stream_lines(lines)),
        Err(e) => state.reject(e).await,
    }
}

/// GET /logs/{service_name}/{server_id}/{date}
#[instrument(skip(state))]
async fn partition_log(
    State(state): State<AppState>,
    Path((service_name, server_id, date)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    let key = match PartitionKey::new(&service_name, &server_id, &date) {
        Ok(key) => key,
        Err(e) => return state.reject(StoreError::from(e)).await,
    };

    match state.event_store.retrieve_sequence(&key).await {
        Ok(lines) => {
            state
                .record(ServerLogLevel::Info, &format!("Served event log: {key}"))
                .await;
            Ok(stream_lines(lines))
        }
        Err(e) => state.reject(e).await,
    }
}

/// Returns the retrieval router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/logs", get(server_log))
        .route("/logs/{service_name}/{server_id}/{date}", get(partition_log))
}
