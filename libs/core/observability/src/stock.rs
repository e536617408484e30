//! Stock operation metrics.

use metrics::{counter, gauge, histogram};

/// Stock metrics recorder
pub struct StockMetrics;

impl StockMetrics {
    /// Count one add/remove attempt by its outcome
    /// (`success`, `not_found`, `insufficient_stock`, `conflict`, `invalid`, `error`).
    pub fn record_operation(operation: &'static str, outcome: &'static str) {
        counter!(
            "stock_operations_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
    }

    /// Record a committed change: units moved, resulting level and latency.
    pub fn record_committed(
        operation: &'static str,
        product_id: i32,
        amount: i32,
        quantity_in_stock: i32,
        duration_secs: f64,
    ) {
        Self::record_operation(operation, "success");

        counter!("stock_units_total", "operation" => operation).increment(amount.max(0) as u64);

        histogram!("stock_operation_duration_seconds", "operation" => operation)
            .record(duration_secs);

        Self::set_quantity(product_id, quantity_in_stock);
    }

    pub fn set_quantity(product_id: i32, quantity_in_stock: i32) {
        gauge!("stock_quantity", "product_id" => product_id.to_string())
            .set(f64::from(quantity_in_stock));
    }
}
