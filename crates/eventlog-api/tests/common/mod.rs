//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use eventlog_store::FileEventStore;
use eventlog_test_support::FixedClock;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use eventlog_api::routes;
use eventlog_api::state::AppState;

/// A gateway backed by a real `FileEventStore` under a temporary directory.
pub struct TestApp {
    /// Keeps the temporary log root alive for the duration of the test.
    pub dir: TempDir,
    /// The store behind the router.
    pub store: Arc<FileEventStore>,
    /// The assembled router.
    pub router: Router,
}

impl TestApp {
    /// Returns a fresh handle to the router for one request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full app router over a fresh log root with a fixed clock. Uses
/// the same route structure as `main.rs`.
pub async fn build_test_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(FixedClock::at(2024, 1, 1, 10, 0, 0));
    let store = Arc::new(
        FileEventStore::open(dir.path().join("logs"), clock)
            .await
            .unwrap(),
    );
    let router = routes::router().with_state(AppState::new(store.clone()));

    TestApp { dir, store, router }
}

/// Send a POST request with a JSON body and return the status and body text.
pub async fn post_json(app: Router, uri: &str, body: &serde_json::Value) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the status and body text.
pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

/// The login event used by the round-trip scenarios.
pub fn login_body() -> serde_json::Value {
    serde_json::json!({
        "service_name": "auth",
        "server_id": "s1",
        "date": "2024-01-01",
        "time": "10:00:00",
        "level": "INFO",
        "event_type": "login",
        "description": "user x logged in"
    })
}
