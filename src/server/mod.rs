//! HTTP front of the excerpt formatters.
//!
//! Routes live in [`routes`], shared registry/store/format state in [`state`].
//! The listening port comes from the [`ServiceConfig`](crate::config::ServiceConfig)
//! held by the state.

pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Router with the API routes, open CORS for editor front-ends, and request tracing.
#[must_use]
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serve the excerpt API on the configured port until the process stops.
///
/// # Errors
/// Returns an error if the port cannot be bound or serving fails.
pub async fn run_server(
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    run_server_with_shutdown(state, std::future::pending()).await
}

/// Serve the excerpt API until `shutdown_signal` completes.
///
/// In-flight requests, including pending settings writes, finish before returning.
///
/// # Errors
/// Returns an error if the port cannot be bound or serving fails.
pub async fn run_server_with_shutdown<F>(
    state: Arc<AppState>,
    shutdown_signal: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let formatters = state.registry.definitions().len();
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Excerpt service listening on http://{addr} ({formatters} formatters)");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    tracing::info!("Excerpt service stopped");
    Ok(())
}
