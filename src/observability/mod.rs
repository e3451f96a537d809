//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handler and adapters produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout / CloudWatch
//!     → Metrics endpoint (Prometheus scrape, local mode only)
//! ```
//!
//! # Design Decisions
//! - Failure kinds are only distinguished here, never in responses
//! - Request ID is attached to every request span

pub mod logging;
pub mod metrics;
