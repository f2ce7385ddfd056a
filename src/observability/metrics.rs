//! Metrics collection and exposition.
//!
//! # Metrics
//! - `trimmer_requests_total` (counter): served payloads by route, status
//! - `trimmer_request_duration_seconds` (histogram): generation latency by route
//!
//! Recording is a no-op until a recorder is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one trimmer request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    ::metrics::counter!("trimmer_requests_total", "route" => route, "status" => status.to_string())
        .increment(1);
    ::metrics::histogram!("trimmer_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}
