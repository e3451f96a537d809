//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! transport adapter (local listener / serverless)
//!     → server.rs (Axum setup, request ID, trace layer)
//!     → request.rs (ClientAddr, request ID)
//!     → handler.rs (origin check, upstream lookup)
//!     → response.rs (CORS headers, opaque 403)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use handler::{resolve_visit, visit_handler, AppState};
pub use request::{ClientAddr, MakeRequestUuid, X_REQUEST_ID};
pub use response::{VisitError, VisitReply, ALLOWED_HEADERS, REJECTION_BODY};
pub use server::{build_router, HttpServer};
