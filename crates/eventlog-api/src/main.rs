//! Event Logger server entry point.

use std::sync::Arc;

use eventlog_api::config::Config;
use eventlog_api::error::AppError;
use eventlog_api::routes;
use eventlog_api::state::AppState;
use eventlog_core::clock::SystemClock;
use eventlog_core::store::{EventStore, ServerLogLevel};
use eventlog_store::FileEventStore;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = Config::from_env()?;

    // The log root must exist before anything is served.
    let store = FileEventStore::open(&config.log_dir, Arc::new(SystemClock)).await?;
    store
        .record(ServerLogLevel::Info, "Event Server Starting...")
        .await?;
    store
        .record(
            ServerLogLevel::Info,
            &format!("Log storage directory set to {}", store.root().display()),
        )
        .await?;
    store
        .record(
            ServerLogLevel::Info,
            &format!(
                "Server logs located at: {}",
                store.server_log_path().display()
            ),
        )
        .await?;

    let app_state = AppState::new(Arc::new(store));

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(app_state.clone());

    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    app_state
        .record(ServerLogLevel::Info, "Event Logger started")
        .await;

    axum::serve(listener, app).await?;

    Ok(())
}
