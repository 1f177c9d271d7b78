//! Prometheus metrics for the executor lifecycle.

use metrics::{describe_counter, describe_histogram};

// === Metric Name Constants ===

/// Orders submitted counter metric name.
pub const METRIC_ORDERS_SUBMITTED: &str = "orders_submitted_total";
/// Orders filled counter metric name.
pub const METRIC_ORDERS_FILLED: &str = "orders_filled_total";
/// Orders failed counter metric name.
pub const METRIC_ORDERS_FAILED: &str = "orders_failed_total";
/// Orders cancelled counter metric name.
pub const METRIC_ORDERS_CANCELLED: &str = "orders_cancelled_total";
/// Order retry counter metric name.
pub const METRIC_ORDER_RETRIES: &str = "order_retries_total";
/// Executors stopped counter metric name.
pub const METRIC_EXECUTORS_STOPPED: &str = "executors_stopped_total";
/// Tick duration histogram metric name.
pub const METRIC_TICK_DURATION: &str = "tick_duration_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_ORDERS_SUBMITTED, "Total number of orders submitted");
    describe_counter!(METRIC_ORDERS_FILLED, "Total number of orders filled");
    describe_counter!(METRIC_ORDERS_FAILED, "Total number of orders failed");
    describe_counter!(
        METRIC_ORDERS_CANCELLED,
        "Total number of maker orders cancelled for repricing"
    );
    describe_counter!(METRIC_ORDER_RETRIES, "Total number of order retries");
    describe_counter!(
        METRIC_EXECUTORS_STOPPED,
        "Total number of executors reaching a terminal state"
    );
    describe_histogram!(
        METRIC_TICK_DURATION,
        "Control-loop tick duration in milliseconds"
    );
}
