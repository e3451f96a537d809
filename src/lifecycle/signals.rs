//! OS signal handling and the graceful-shutdown future.

use tokio::sync::broadcast::{self, error::RecvError};

use crate::lifecycle::shutdown::ShutdownReason;

/// Resolves once the shutdown channel fires or every sender is gone.
pub async fn shutdown_requested(mut shutdown: broadcast::Receiver<ShutdownReason>) {
    match shutdown.recv().await {
        Ok(ShutdownReason::Interrupt) => tracing::info!("Shutdown signal received"),
        Ok(ShutdownReason::Requested) => tracing::info!("Shutdown requested"),
        Err(RecvError::Lagged(_)) => tracing::info!("Shutdown requested"),
        Err(RecvError::Closed) => tracing::info!("Shutdown coordinator dropped"),
    }
}

/// Waits for Ctrl+C. Never resolves if the handler cannot be installed.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
