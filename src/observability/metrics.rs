//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, route, status
//! - `api_request_duration_seconds` (histogram): handler latency
//! - `api_store_calls_total` (counter): store calls by table, operation, outcome
//! - `api_store_call_duration_seconds` (histogram): store round-trip latency

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime, at most once per process.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished HTTP request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("api_requests_total", &labels).increment(1);
    histogram!("api_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

/// Record a finished store call.
pub fn record_store_call(table: &str, operation: &'static str, ok: bool, start: Instant) {
    let labels = [
        ("table", table.to_string()),
        ("operation", operation.to_string()),
        ("outcome", if ok { "ok" } else { "error" }.to_string()),
    ];
    counter!("api_store_calls_total", &labels).increment(1);
    histogram!("api_store_call_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}
