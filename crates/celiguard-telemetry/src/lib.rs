//! Celiguard Telemetry
//!
//! Process-level counters and Prometheus metric registration for the
//! celiguard service. Encoder fallback substitutions are tracked here
//! because they signal train/serve distribution drift and must never be
//! absorbed silently.

pub mod metrics;

pub use crate::metrics::{ServiceMetrics, ServiceMetricsSnapshot};

/// Metric name for total requests, labelled by endpoint
pub const REQUESTS_TOTAL: &str = "celiguard_requests_total";

/// Metric name for unseen-category fallback substitutions, labelled by column
pub const ENCODER_FALLBACK_TOTAL: &str = "celiguard_encoder_fallback_total";

/// Metric name for scan verdicts, labelled by outcome
pub const SCAN_VERDICTS_TOTAL: &str = "celiguard_scan_verdicts_total";

/// Metric name for per-request failures, labelled by error kind
pub const ERRORS_TOTAL: &str = "celiguard_errors_total";

/// Metric name for risk pipeline latency in microseconds
pub const INFERENCE_LATENCY_US: &str = "celiguard_inference_latency_us";

/// Register descriptions for all celiguard metrics with the installed recorder
pub fn describe_metrics() {
    ::metrics::describe_counter!(REQUESTS_TOTAL, "Total number of requests by endpoint");
    ::metrics::describe_counter!(
        ENCODER_FALLBACK_TOTAL,
        "Unseen categorical values substituted with the fallback class, by column"
    );
    ::metrics::describe_counter!(SCAN_VERDICTS_TOTAL, "Ingredient scan verdicts by outcome");
    ::metrics::describe_counter!(ERRORS_TOTAL, "Per-request failures by error kind");
    ::metrics::describe_histogram!(
        INFERENCE_LATENCY_US,
        ::metrics::Unit::Microseconds,
        "Risk inference pipeline latency in microseconds"
    );
}
