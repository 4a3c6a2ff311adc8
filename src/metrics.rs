//! Prometheus recorder and gateway metrics
//!
//! The recorder is installed once per process; the HTTP layer only renders it.

use ::metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    let _ = &*PROMETHEUS_HANDLE;

    describe_counter!(
        "prism_requests_total",
        "Total number of gateway calls by provider and outcome"
    );
    describe_histogram!(
        "prism_request_duration_seconds",
        "Gateway call duration in seconds"
    );
    describe_counter!(
        "prism_upstream_responses_total",
        "Upstream responses by provider and HTTP status"
    );
}

/// Current metrics in Prometheus text format
pub fn render() -> String {
    PROMETHEUS_HANDLE.render()
}

/// Record a finished gateway call
pub fn record_request(provider: &str, outcome: &str, duration_secs: f64) {
    counter!(
        "prism_requests_total",
        "provider" => provider.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    histogram!("prism_request_duration_seconds", "provider" => provider.to_string())
        .record(duration_secs);
}

/// Record an upstream HTTP status
pub fn record_upstream_response(provider: &str, status: u16) {
    counter!(
        "prism_upstream_responses_total",
        "provider" => provider.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
