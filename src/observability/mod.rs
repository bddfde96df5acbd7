//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http + store subsystems produce:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout log collection
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span
//! - Metrics are disabled by default; recording is a no-op without a recorder

pub mod logging;
pub mod metrics;
