//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → origin.rs (Origin header against the allowlist)
//!     → Pass to the visit handler, or reject with 403
//! ```
//!
//! # Design Decisions
//! - Fail closed: a missing or unreadable Origin is rejected
//! - The allowlist is built once at startup and never mutated

pub mod origin;

pub use origin::{request_origin, OriginPolicy};
