//! Event ingestion endpoint.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, routing::post};
use eventlog_core::event::Event;
use eventlog_core::store::ServerLogLevel;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned after an event is stored.
pub const APPENDED_MESSAGE: &str = "Event appended";

/// POST /append
///
/// Accepts a JSON event with the keys `service_name`, `server_id`, `date`,
/// `time`, `level`, `event_type` and `description`.
#[instrument(skip(state, body))]
async fn append_event(
    State(state): State<AppState>,
    body: Result<Json<Event>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let Json(event) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return state
                .reject(ApiError::MalformedBody(rejection.body_text()))
                .await;
        }
    };

    match state.event_store.append(&event).await {
        Ok(key) => {
            info!(partition = %key, "appended event");
            state
                .record(
                    ServerLogLevel::Info,
                    &format!("Appended new event to log: {key}"),
                )
                .await;
            Ok(APPENDED_MESSAGE)
        }
        Err(e) => state.reject(e).await,
    }
}

/// Returns the ingestion router.
pub fn router() -> Router<AppState> {
    Router::new().route("/append", post(append_event))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use eventlog_core::event::PartitionKey;
    use eventlog_test_support::{FailingEventStore, RecordingEventStore};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn login_body() -> Value {
        json!({
            "service_name": "auth",
            "server_id": "s1",
            "date": "2024-01-01",
            "time": "10:00:00",
            "level": "INFO",
            "event_type": "login",
            "description": "user x logged in"
        })
    }

    fn post(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/append")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_append_stores_event_and_records_it() {
        // Arrange
        let store = Arc::new(RecordingEventStore::new());
        let app = router().with_state(AppState::new(store.clone()));

        // Act
        let response = app
            .oneshot(post(serde_json::to_vec(&login_body()).unwrap()))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, APPENDED_MESSAGE);
        let key = PartitionKey::new("auth", "s1", "2024-01-01").unwrap();
        assert_eq!(
            store.partition(&key).unwrap(),
            vec!["2024-01-01, 10:00:00, auth, s1, INFO, login, user x logged in"]
        );
        assert_eq!(
            store.records(),
            vec![(
                ServerLogLevel::Info,
                "Appended new event to log: auth/s1/2024-01-01.log".to_owned()
            )]
        );
    }

    #[tokio::test]
    async fn test_append_rejects_unparsable_body() {
        // Arrange
        let store = Arc::new(RecordingEventStore::new());
        let app = router().with_state(AppState::new(store.clone()));

        // Act
        let response = app.oneshot(post("{not json")).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.starts_with("ERROR: malformed request body"));
        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, ServerLogLevel::Severe);
    }

    #[tokio::test]
    async fn test_append_rejects_missing_key() {
        // Arrange
        let app = router().with_state(AppState::new(Arc::new(RecordingEventStore::new())));
        let mut body = login_body();
        body.as_object_mut().unwrap().remove("event_type");

        // Act
        let response = app
            .oneshot(post(serde_json::to_vec(&body).unwrap()))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("event_type"));
    }

    #[tokio::test]
    async fn test_append_rejects_empty_field() {
        // Arrange
        let app = router().with_state(AppState::new(Arc::new(RecordingEventStore::new())));
        let mut body = login_body();
        body["level"] = json!("");

        // Act
        let response = app
            .oneshot(post(serde_json::to_vec(&body).unwrap()))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(response).await,
            "ERROR: missing required field: level\n"
        );
    }

    #[tokio::test]
    async fn test_append_rejects_path_traversal() {
        // Arrange
        let store = Arc::new(RecordingEventStore::new());
        let app = router().with_state(AppState::new(store.clone()));
        let mut body = login_body();
        body["server_id"] = json!("../../etc");

        // Act
        let response = app
            .oneshot(post(serde_json::to_vec(&body).unwrap()))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.starts_with("ERROR: invalid server_id"));
    }

    #[tokio::test]
    async fn test_append_storage_failure_returns_500() {
        // Arrange
        let app = router().with_state(AppState::new(Arc::new(FailingEventStore)));

        // Act
        let response = app
            .oneshot(post(serde_json::to_vec(&login_body()).unwrap()))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.starts_with("ERROR: storage unavailable"));
    }
}
