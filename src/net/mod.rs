//! Transport adapters.
//!
//! # Data Flow
//! ```text
//! Local mode:
//!     TCP connection → listener.rs (peer SocketAddr → ClientAddr) → router
//!
//! Serverless mode:
//!     Lambda event → serverless.rs (event source IP → ClientAddr) → router
//! ```
//!
//! # Design Decisions
//! - Both adapters wrap the same router; the handler never sees
//!   `ConnectInfo` or a Lambda request context
//! - Mode is chosen once at startup (see `lifecycle::startup`)

pub mod listener;
pub mod serverless;
