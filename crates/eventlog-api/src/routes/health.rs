//! Liveness endpoint.

use axum::extract::State;
use axum::{Router, routing::get};
use eventlog_core::store::ServerLogLevel;

use crate::state::AppState;

/// Body returned by `GET /`.
pub const LIVENESS_MESSAGE: &str = "Event Logger is Active";

/// GET /
async fn home_page(State(state): State<AppState>) -> &'static str {
    state.record(ServerLogLevel::Info, "Homepage visitor").await;
    LIVENESS_MESSAGE
}

/// Returns the liveness router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home_page))
}
