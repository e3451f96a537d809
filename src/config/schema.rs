//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the visit locator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (local mode only).
    pub listener: ListenerConfig,

    /// Browser origins allowed to receive a visit.
    pub origins: OriginConfig,

    /// Upstream geolocation provider.
    pub geolocation: GeolocationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8888").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8888".to_string(),
        }
    }
}

/// Origin allowlist configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OriginConfig {
    /// Exact `Origin` values, without a trailing slash.
    pub allowed: Vec<String>,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            allowed: vec![
                "https://tomontheinternet.com".to_string(),
                "https://www.tomontheinternet.com".to_string(),
                "http://127.0.0.1:8080".to_string(),
                "https://www.jpedmedia.com".to_string(),
                "https://jpedmedia.com".to_string(),
            ],
        }
    }
}

/// Upstream geolocation provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeolocationConfig {
    /// Base URL; the client IP is appended as the last path segment.
    pub base_url: String,

    /// Whole-request timeout in seconds. `None` keeps the client default.
    pub timeout_secs: Option<u64>,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://ip-api.com/json".to_string(),
            timeout_secs: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8888");
        assert_eq!(config.origins.allowed.len(), 5);
        assert_eq!(config.geolocation.base_url, "http://ip-api.com/json");
        assert!(config.geolocation.timeout_secs.is_none());
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [origins]
            allowed = ["https://example.com"]

            [geolocation]
            timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.origins.allowed, vec!["https://example.com"]);
        assert_eq!(config.geolocation.timeout_secs, Some(3));
        assert_eq!(config.geolocation.base_url, "http://ip-api.com/json");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8888");
    }
}
