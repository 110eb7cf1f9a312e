//! HTTP server startup logic.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::{AppConfig, AppInfo};
use crate::logging::STARTUP_TARGET;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind the configured address and serve until a shutdown signal arrives.
///
/// A bind failure is returned immediately; there is no retry.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = SocketAddr::new(config.http.host, config.http.port);
    let listener = bind(addr).await?;
    serve(listener, app, &config.app, shutdown::shutdown_signal()).await
}

/// Bind a TCP listener, mapping failures to [`ServerError::Bind`].
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve `app` on an already-bound listener until `signal` resolves.
///
/// Emits the three startup lines once the socket is known to be listening.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    info: &AppInfo,
    signal: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let port = listener.local_addr().map_err(ServerError::Serve)?.port();

    tracing::info!(
        target: STARTUP_TARGET,
        "DevOps EKS Pipeline app listening on port {}",
        port
    );
    tracing::info!(target: STARTUP_TARGET, "Environment: {}", info.environment);
    tracing::info!(target: STARTUP_TARGET, "Version: {}", info.version);

    axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}
