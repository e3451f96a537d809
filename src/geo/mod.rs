//! Geolocation subsystem.
//!
//! # Data Flow
//! ```text
//! client IP
//!     → client.rs (GET <base>/<ip>, read body)
//!     → visit.rs (decode {country, city})
//!     → Visit handed back to the handler
//! ```

pub mod client;
pub mod visit;

pub use client::{GeoClient, GeoError};
pub use visit::Visit;
