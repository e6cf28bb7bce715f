//! Metrics collection and exposition.
//!
//! # Metrics
//! - `registry_requests_total` (counter): requests by method, status
//!
//! The `method` label is one of the standard methods or `OTHER`, so clients
//! cannot mint new series with extension methods.
//! - `registry_request_duration_seconds` (histogram): latency by method
//! - `registry_endpoints` (gauge): endpoints in the compiled registry
//!
//! Recording is a no-op until a recorder is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::{Method, StatusCode};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

const METHOD_LABELS: [(Method, &str); 9] = [
    (Method::GET, "GET"),
    (Method::POST, "POST"),
    (Method::PUT, "PUT"),
    (Method::PATCH, "PATCH"),
    (Method::DELETE, "DELETE"),
    (Method::HEAD, "HEAD"),
    (Method::OPTIONS, "OPTIONS"),
    (Method::CONNECT, "CONNECT"),
    (Method::TRACE, "TRACE"),
];

/// Bounded label for `method`.
pub fn method_label(method: &Method) -> &'static str {
    METHOD_LABELS
        .iter()
        .find(|(known, _)| known == method)
        .map_or("OTHER", |(_, label)| *label)
}

/// Record one dispatched request.
pub fn record_request(method: &Method, status: StatusCode, start: Instant) {
    let method = method_label(method);
    metrics::counter!(
        "registry_requests_total",
        "method" => method,
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    metrics::histogram!(
        "registry_request_duration_seconds",
        "method" => method
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the size of a freshly compiled registry.
pub fn record_registry_size(endpoints: usize) {
    metrics::gauge!("registry_endpoints").set(endpoints as f64);
}
