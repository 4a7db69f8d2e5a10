//! Metrics collection and exposition.
//!
//! # Metrics
//! - `route_host_dispatch_total` (counter): dispatched requests by outcome, status
//! - `route_host_dispatch_duration_seconds` (histogram): dispatch latency by outcome
//!
//! Without an installed recorder the macros are no-ops.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one dispatched request.
pub fn record_dispatch(outcome: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "route_host_dispatch_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("route_host_dispatch_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
