//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the single visit route
//! - Wire up middleware (tracing, request ID)
//! - Hand the router to a transport adapter (local listener or serverless)

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::geo::GeoError;
use crate::http::handler::{visit_handler, AppState};
use crate::http::request::{request_id, MakeRequestUuid, X_REQUEST_ID};
use crate::lifecycle::ShutdownReason;
use crate::net::{listener, serverless};

/// HTTP server for the visit locator.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, GeoError> {
        let state = AppState::from_config(&config)?;
        let router = build_router(state);
        Ok(Self { router, config })
    }

    /// The adapter-neutral router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on a bound TCP listener until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<ShutdownReason>,
    ) -> Result<(), std::io::Error> {
        listener::serve(self.router, listener, shutdown).await
    }

    /// Hand the router to the Lambda runtime.
    pub async fn run_serverless(self) -> Result<(), lambda_http::Error> {
        serverless::serve(self.router).await
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(visit_handler).head(head_not_allowed))
        .with_state(state)
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id(request),
            )
        }))
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
}

/// `get` would also serve HEAD, which still costs an upstream lookup.
async fn head_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET")])
}
