//! AWS Lambda transport.
//!
//! The Lambda runtime turns API Gateway / ALB events into `http::Request`s
//! with the event's request context stored as an extension. The caller's
//! address is the event source IP, without a port.

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use lambda_http::request::RequestContext;
use lambda_http::RequestExt;

use crate::http::ClientAddr;

/// Source IP recorded by API Gateway, if the event carries one.
#[allow(unreachable_patterns)]
pub fn source_ip<B>(request: &axum::http::Request<B>) -> Option<&str> {
    match request.request_context_ref()? {
        RequestContext::ApiGatewayV1(ctx) => ctx.identity.source_ip.as_deref(),
        RequestContext::ApiGatewayV2(ctx) => ctx.http.source_ip.as_deref(),
        RequestContext::WebSocket(ctx) => ctx.identity.source_ip.as_deref(),
        _ => None,
    }
}

/// Attach the event source IP.
pub async fn source_client_addr(mut request: Request, next: Next) -> Response {
    if let Some(ip) = source_ip(&request).map(str::to_owned) {
        request.extensions_mut().insert(ClientAddr::new(ip));
    }

    next.run(request).await
}

/// The router as served by the Lambda runtime.
pub fn router(router: Router) -> Router {
    router.layer(middleware::from_fn(source_client_addr))
}

/// Run the Lambda event loop until the runtime shuts the function down.
pub async fn serve(router: Router) -> Result<(), lambda_http::Error> {
    tracing::info!("Serving Lambda invocations");
    lambda_http::run(self::router(router)).await
}
