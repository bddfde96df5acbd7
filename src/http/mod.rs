//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span, metrics)
//!     → leads.rs / projects.rs (route handlers)
//!     → records.rs (one store call per request)
//!     → error.rs (store failures → 500)
//!     → Send to client
//! ```

pub mod error;
pub mod leads;
pub mod projects;
pub mod records;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
