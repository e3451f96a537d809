//! Upstream geolocation client.
//!
//! One GET per lookup, no retries. The upstream status code is not inspected:
//! the first JSON value of whatever body comes back is decoded as a [`Visit`].

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::GeolocationConfig;
use crate::geo::visit::Visit;

/// Failures talking to the geolocation provider.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The base URL from configuration did not parse.
    #[error("invalid geolocation base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    /// The HTTP client could not be constructed.
    #[error("failed to build geolocation client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request or the body read failed.
    #[error("geolocation request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The body was not a JSON object of the expected shape.
    #[error("geolocation response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Client for a `GET <base>/<ip>` style geolocation API such as ip-api.com.
#[derive(Debug, Clone)]
pub struct GeoClient {
    client: reqwest::Client,
    base_url: Url,
}

impl GeoClient {
    pub fn new(config: &GeolocationConfig) -> Result<Self, GeoError> {
        let base_url = Url::parse(&config.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(GeoError::Client)?;

        Ok(Self { client, base_url })
    }

    /// Lookup URL for an address, joined with exactly one `/`.
    pub fn lookup_url(&self, ip: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), ip)
    }

    /// Resolve an address to a visit.
    pub async fn locate(&self, ip: &str) -> Result<Visit, GeoError> {
        let url = self.lookup_url(ip);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(GeoError::Transport)?;

        tracing::debug!(
            url = %url,
            status = %response.status(),
            "Geolocation response received"
        );

        // Reading the whole body releases the connection on every path below.
        let body = response.bytes().await.map_err(GeoError::Transport)?;
        Visit::from_body(&body).map_err(GeoError::Decode)
    }
}
