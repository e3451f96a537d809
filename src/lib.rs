//! Visit locator library.
//!
//! Resolves the caller's country and city from its IP address for a fixed
//! set of browser origins, behind either a local listener or AWS Lambda.

pub mod config;
pub mod geo;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod security;

pub use config::schema::ServiceConfig;
pub use geo::Visit;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
