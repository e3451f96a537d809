//! Visit locator
//!
//! Answers `GET /` with the caller's `{"country", "city"}` as reported by an
//! IP geolocation provider, for allowlisted browser origins only.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!   TCP client ──────▶│ net::listener   ─┐                           │
//!                     │                  ├─▶ http::server ─▶ handler │──▶ ip-api.com
//!   Lambda event ────▶│ net::serverless ─┘        │                  │
//!                     │                     security::origin         │
//!                     └──────────────────────────────────────────────┘
//! ```
//!
//! The mode is picked once at startup: a non-blank `AWS_LAMBDA_FUNCTION_NAME`
//! selects the Lambda adapter, anything else binds a local listener.

use std::path::PathBuf;

use clap::Parser;

use visit_locator::config::{load_config, ServiceConfig};
use visit_locator::lifecycle::{self, DeploymentMode};

#[derive(Parser)]
#[command(name = "visit-locator")]
#[command(about = "Resolve a visitor's country and city from its IP address", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    lifecycle::start(config, DeploymentMode::detect()).await?;
    Ok(())
}
