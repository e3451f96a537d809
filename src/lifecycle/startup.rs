//! Startup orchestration.
//!
//! # Responsibilities
//! - Decide the deployment mode from the environment, once
//! - Initialize subsystems in order: logging, metrics, HTTP state
//! - Hand the router to the chosen transport adapter
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener binds last (traffic only when ready)

use thiserror::Error;

use crate::config::{ConfigError, ServiceConfig};
use crate::geo::GeoError;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::net::listener::{self, ListenerError};
use crate::observability::{logging, metrics};

/// Set by the Lambda runtime in every function's environment.
pub const LAMBDA_FUNCTION_ENV: &str = "AWS_LAMBDA_FUNCTION_NAME";

/// Which transport adapter serves the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    /// Bind a TCP listener.
    Local,
    /// Serve Lambda invocations.
    Serverless,
}

impl DeploymentMode {
    /// Read the mode from the process environment.
    pub fn detect() -> Self {
        let name = std::env::var_os(LAMBDA_FUNCTION_ENV).map(|v| v.to_string_lossy().into_owned());
        Self::from_function_name(name.as_deref())
    }

    /// Serverless when the function name is present and not blank.
    pub fn from_function_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(name) if !name.is_empty() => DeploymentMode::Serverless,
            _ => DeploymentMode::Local,
        }
    }
}

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("geolocation client error: {0}")]
    Geo(#[from] GeoError),
    #[error("listener error: {0}")]
    Listener(#[from] ListenerError),
    #[error("invalid metrics address: {0}")]
    MetricsAddress(std::net::AddrParseError),
    #[error("metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
    #[error("serverless runtime error: {0}")]
    Serverless(lambda_http::Error),
}

/// Initialize everything and serve until shutdown.
pub async fn start(config: ServiceConfig, mode: DeploymentMode) -> Result<(), StartupError> {
    logging::init_logging(&config.observability, mode);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = ?mode,
        "visit-locator starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        origins = config.origins.allowed.len(),
        upstream = %config.geolocation.base_url,
        "Configuration loaded"
    );

    let server = HttpServer::new(config)?;

    match mode {
        DeploymentMode::Serverless => {
            server.run_serverless().await.map_err(StartupError::Serverless)?;
        }
        DeploymentMode::Local => {
            let observability = &server.config().observability;
            if observability.metrics_enabled {
                let addr = observability
                    .metrics_address
                    .parse()
                    .map_err(StartupError::MetricsAddress)?;
                metrics::init_metrics(addr)?;
            }

            let listener = listener::bind(&server.config().listener).await?;
            let shutdown = Shutdown::new();
            let interrupt = shutdown.trigger_on_ctrl_c();
            let served = server.run(listener, shutdown.subscribe()).await;
            interrupt.abort();
            served?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
