//! Local TCP transport.
//!
//! # Responsibilities
//! - Bind the configured address
//! - Serve the router with peer addresses attached as [`ClientAddr`]
//! - Stop when the shutdown broadcast fires

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::ListenerConfig;
use crate::http::ClientAddr;
use crate::lifecycle::shutdown::ShutdownReason;
use crate::lifecycle::signals::shutdown_requested;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured address does not parse.
    #[error("Invalid bind address {address:?}: {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },
    /// Failed to bind to address.
    #[error("Failed to bind: {0}")]
    Bind(#[source] std::io::Error),
}

/// Bind to the configured address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .map_err(|source| ListenerError::Address {
            address: config.bind_address.clone(),
            source,
        })?;

    let listener = TcpListener::bind(addr).await.map_err(ListenerError::Bind)?;

    tracing::info!(
        address = %listener.local_addr().map_err(ListenerError::Bind)?,
        "Listener bound"
    );

    Ok(listener)
}

/// Attach the TCP peer address in `ip:port` form.
pub async fn peer_client_addr(mut request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string());

    if let Some(peer) = peer {
        request.extensions_mut().insert(ClientAddr::new(peer));
    }

    next.run(request).await
}

/// The router as served by the local listener.
pub fn router(router: Router) -> Router {
    router.layer(middleware::from_fn(peer_client_addr))
}

/// Serve until `shutdown` fires.
pub async fn serve(
    router: Router,
    listener: TcpListener,
    shutdown: broadcast::Receiver<ShutdownReason>,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    let app = self::router(router).into_make_service_with_connect_info::<SocketAddr>();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_requested(shutdown))
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
