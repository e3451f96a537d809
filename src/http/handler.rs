//! The visit handler.
//!
//! Origin check first, then one upstream lookup. Nothing here knows which
//! transport adapter delivered the request.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::HeaderMap;

use crate::config::ServiceConfig;
use crate::geo::{GeoClient, GeoError};
use crate::http::request::ClientAddr;
use crate::http::response::{VisitError, VisitReply};
use crate::observability::metrics;
use crate::security::{request_origin, OriginPolicy};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub policy: Arc<OriginPolicy>,
    pub geo: GeoClient,
}

impl AppState {
    pub fn new(policy: OriginPolicy, geo: GeoClient) -> Self {
        Self {
            policy: Arc::new(policy),
            geo,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, GeoError> {
        let policy = OriginPolicy::new(config.origins.allowed.iter().cloned());
        let geo = GeoClient::new(&config.geolocation)?;
        Ok(Self::new(policy, geo))
    }
}

/// `GET /`
pub async fn visit_handler(
    State(state): State<AppState>,
    client_addr: ClientAddr,
    headers: HeaderMap,
) -> Result<VisitReply, VisitError> {
    let start_time = Instant::now();
    let result = resolve_visit(&state, &headers, &client_addr).await;

    match &result {
        Ok(reply) => {
            tracing::debug!(
                client = %client_addr.as_str(),
                country = %reply.visit.country,
                city = %reply.visit.city,
                "Visit resolved"
            );
            metrics::record_visit("ok", start_time);
        }
        Err(e) => {
            tracing::warn!(
                client = %client_addr.as_str(),
                outcome = e.outcome(),
                error = %e,
                "Visit rejected"
            );
            metrics::record_visit(e.outcome(), start_time);
        }
    }

    result
}

/// Resolve the caller's visit, or say why not.
pub async fn resolve_visit(
    state: &AppState,
    headers: &HeaderMap,
    client_addr: &ClientAddr,
) -> Result<VisitReply, VisitError> {
    let echoed = match request_origin(headers) {
        Some((value, origin)) if state.policy.is_allowed(origin) => value.clone(),
        rejected => {
            return Err(VisitError::PolicyRejection {
                origin: rejected.map(|(_, origin)| origin.to_string()).unwrap_or_default(),
            })
        }
    };

    let visit = state.geo.locate(client_addr.ip()).await?;

    Ok(VisitReply {
        origin: echoed,
        visit,
    })
}
