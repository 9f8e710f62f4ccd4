use super::routes;
use super::state::AppState;
use crate::config::ServerConfig;
use crate::domain::{BridgeError, Result};
use axum::Router;
use std::future::Future;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener and serve until `shutdown` resolves
///
/// In-flight requests, including a running sync, are allowed to finish.
///
/// # Errors
///
/// Returns [`BridgeError::Io`] if the address cannot be bound or the server
/// fails.
pub async fn serve<F>(config: &ServerConfig, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BridgeError::Io(format!("Failed to bind {addr}: {e}")))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| BridgeError::Io(e.to_string()))?;
    tracing::info!(address = %local_addr, "Server listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| BridgeError::Io(format!("Server error: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}
