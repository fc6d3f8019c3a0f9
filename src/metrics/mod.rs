// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    REQUESTS_TOTAL,
    REQUEST_DURATION,
    COSMOS_API_CALLS,
    COSMOS_API_DURATION,
};

/// Helper to record request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration_secs: f64) {
    let status = status_code.to_string();

    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint, &status])
        .observe(duration_secs);
}

/// Helper to record Cosmos platform call metrics
pub fn record_remote_call(operation: &str, outcome: &str, duration_secs: f64) {
    COSMOS_API_CALLS
        .with_label_values(&[operation, outcome])
        .inc();

    COSMOS_API_DURATION
        .with_label_values(&[operation])
        .observe(duration_secs);
}
