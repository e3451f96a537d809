//! Request-side plumbing.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) as early as possible
//! - Carry the transport's view of the caller address into the handler
//!
//! # Design Decisions
//! - Each transport adapter inserts a [`ClientAddr`] extension; the handler
//!   only ever sees that value, never `ConnectInfo` or a Lambda context
//! - An inbound `x-request-id` is kept rather than replaced

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID set by the request-id layer.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Remote address string as the transport adapter saw it.
///
/// `"ip:port"` behind the local listener, the bare source IP behind the
/// serverless adapter, empty when the adapter could not tell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientAddr(String);

impl ClientAddr {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the first `:`.
    ///
    /// IPv6 literals come out truncated (`[::1]:80` yields `[`); callers rely
    /// on this exact split.
    pub fn ip(&self) -> &str {
        self.0.split(':').next().unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<ClientAddr>().cloned().unwrap_or_default())
    }
}
