//! Metrics collection and exposition.
//!
//! # Metrics
//! - `visit_requests_total` (counter): requests by `outcome`
//! - `visit_request_duration_seconds` (histogram): handler latency by `outcome`
//!
//! Outcomes are `ok`, `forbidden_origin`, `upstream_transport` and
//! `upstream_decode`. Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled visit request.
pub fn record_visit(outcome: &'static str, start_time: Instant) {
    ::metrics::counter!("visit_requests_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("visit_request_duration_seconds", "outcome" => outcome)
        .record(start_time.elapsed().as_secs_f64());
}
