//! Metrics collection and exposition.
//!
//! # Metrics
//! - `config_store_requests_total` (counter): requests by operation, status
//! - `config_store_request_duration_seconds` (histogram): latency by operation
//! - `config_store_validations_total` (counter): performed, skipped, rejected

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(operation: &'static str, status: u16, start: Instant) {
    counter!(
        "config_store_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("config_store_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_validation(outcome: &'static str) {
    counter!("config_store_validations_total", "outcome" => outcome).increment(1);
}
