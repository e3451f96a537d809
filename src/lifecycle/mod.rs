//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Detect mode → Init logging/metrics → Build router → Start adapter
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Ctrl+C or trigger → Broadcast reason → Stop accepting → Drain in-flight requests → Exit
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownReason};
pub use startup::{start, DeploymentMode, StartupError};
