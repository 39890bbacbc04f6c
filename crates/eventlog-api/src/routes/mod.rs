//! Route modules and the assembled gateway router.

use axum::Router;

use crate::state::AppState;

pub mod append;
pub mod health;
pub mod logs;

/// Returns the full gateway router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(logs::router())
        .merge(append::router())
}
