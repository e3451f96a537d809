//! Configuration validation.
//!
//! Semantic checks that serde cannot express. Returns every error found,
//! not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),
    #[error("origins.allowed must not be empty")]
    NoOrigins,
    #[error("origins.allowed must not contain an empty origin")]
    EmptyOrigin,
    #[error("origin {0:?} must not end with '/'")]
    TrailingSlash(String),
    #[error("geolocation.base_url {0:?} is not an http(s) URL")]
    BaseUrl(String),
    #[error("geolocation.timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.origins.allowed.is_empty() {
        errors.push(ValidationError::NoOrigins);
    }
    // Inbound origins lose their trailing slash before matching, so an entry
    // carrying one could never match.
    for origin in &config.origins.allowed {
        if origin.is_empty() {
            errors.push(ValidationError::EmptyOrigin);
        } else if origin.ends_with('/') {
            errors.push(ValidationError::TrailingSlash(origin.clone()));
        }
    }

    match Url::parse(&config.geolocation.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::BaseUrl(config.geolocation.base_url.clone())),
    }

    if config.geolocation.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
