//! Response handling.
//!
//! # Responsibilities
//! - Attach the CORS headers to a successful visit
//! - Map every failure to the same opaque `403 No`
//!
//! # Design Decisions
//! - Error kinds stay distinguishable in logs and metrics, never on the wire
//! - The allowed origin is echoed verbatim, never wildcarded

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::geo::{GeoError, Visit};

/// Request headers a browser may send along with the visit request.
pub const ALLOWED_HEADERS: &str = "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization, accept, origin, Cache-Control, X-Requested-With";

/// Body of every failure response.
pub const REJECTION_BODY: &str = "No";

/// Why a visit could not be served.
#[derive(Debug, Error)]
pub enum VisitError {
    #[error("origin {origin:?} is not allowed")]
    PolicyRejection { origin: String },
    #[error(transparent)]
    Upstream(#[from] GeoError),
}

impl VisitError {
    /// Metrics label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            VisitError::PolicyRejection { .. } => "forbidden_origin",
            VisitError::Upstream(GeoError::Decode(_)) => "upstream_decode",
            VisitError::Upstream(_) => "upstream_transport",
        }
    }
}

impl IntoResponse for VisitError {
    fn into_response(self) -> Response {
        (StatusCode::FORBIDDEN, REJECTION_BODY).into_response()
    }
}

/// A resolved visit plus the origin it is released to.
#[derive(Debug, Clone)]
pub struct VisitReply {
    pub origin: HeaderValue,
    pub visit: Visit,
}

impl IntoResponse for VisitReply {
    fn into_response(self) -> Response {
        let mut response = Json(self.visit).into_response();
        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.origin);
        headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS));
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET"));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_every_error_looks_the_same() {
        let decode = serde_json::from_str::<Visit>("nope").unwrap_err();
        let errors = vec![
            VisitError::PolicyRejection { origin: "https://evil.example".into() },
            VisitError::Upstream(GeoError::Decode(decode)),
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
            assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
            assert_eq!(body_string(response).await, "No");
        }
    }

    #[test]
    fn test_outcome_labels() {
        let rejection = VisitError::PolicyRejection { origin: String::new() };
        assert_eq!(rejection.outcome(), "forbidden_origin");

        let decode = serde_json::from_str::<Visit>("[").unwrap_err();
        assert_eq!(VisitError::from(GeoError::Decode(decode)).outcome(), "upstream_decode");
    }

    #[tokio::test]
    async fn test_reply_headers_and_body() {
        let reply = VisitReply {
            origin: HeaderValue::from_static("https://jpedmedia.com/"),
            visit: Visit { country: "France".into(), city: "Paris".into() },
        };
        let response = reply.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "https://jpedmedia.com/");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], ALLOWED_HEADERS);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "GET");

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, serde_json::json!({"country": "France", "city": "Paris"}));
    }
}
