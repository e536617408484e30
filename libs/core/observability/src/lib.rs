//! Observability utilities for the stock service.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Stock operation metrics ([`StockMetrics`])
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, StockMetrics};
//!
//! init_metrics()?;
//!
//! StockMetrics::record_operation("remove", "insufficient_stock");
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod stock;

pub use middleware::metrics_middleware;
pub use stock::StockMetrics;

// Re-export metrics macros for convenience
pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder.
///
/// Idempotent: later calls return the handle from the first successful one.
/// Fails if another global recorder was installed outside this function.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();

        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_gauge;
    use metrics::describe_histogram;

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    // Stock metrics
    describe_counter!(
        "stock_operations_total",
        "Stock operations by operation and outcome"
    );
    describe_counter!(
        "stock_units_total",
        "Units added to or removed from stock"
    );
    describe_histogram!(
        "stock_operation_duration_seconds",
        "Stock operation duration in seconds"
    );
    describe_gauge!(
        "stock_quantity",
        "Last known quantity in stock per product"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_metrics_is_idempotent() {
        let first = init_metrics().unwrap() as *const PrometheusHandle;
        let second = init_metrics().unwrap() as *const PrometheusHandle;
        assert_eq!(first, second);

        StockMetrics::record_operation("add", "success");
        let rendered = metrics_handler().await;
        assert!(rendered.contains("stock_operations_total"));
    }
}
