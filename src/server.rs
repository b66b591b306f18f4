//! HTTP server initialization and runtime setup.
//!
//! Builds the registry, wires services into application state, and runs the
//! Axum server until shutdown.

use crate::config::Config;
use crate::infrastructure::registry::MemoryRegistry;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Constructs a fresh, empty registry: links live only as long as the
/// process. On ctrl-c the server stops accepting connections and the
/// registry is dropped with it.
///
/// # Errors
///
/// Returns an error if the bind address is invalid, the listener cannot be
/// bound, or the server fails at runtime.
pub async fn run(config: Config) -> Result<()> {
    let generator = Arc::new(RandomCodeGenerator::new(config.code_length));
    let registry = Arc::new(MemoryRegistry::new(generator));
    tracing::info!("Registry initialized (in-memory, session-scoped)");

    let state = AppState::new(
        registry,
        config.default_validity_minutes,
        config.base_url.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, registry discarded");

    Ok(())
}

/// Resolves when ctrl-c is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
