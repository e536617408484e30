//! Product Service - Stock rules layer

use observability::StockMetrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::repository::ProductRepository;

/// Stock service
///
/// Each mutation is a single fetch, check, mutate and save sequence with no
/// retry. The save is version-checked, so a request that lost a race fails
/// with [`ProductError::ConcurrentModification`] instead of overwriting.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All products ordered by ID
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound { product_id: id })
    }

    /// Add `amount` units to a product and return the new stock level
    #[instrument(skip(self))]
    pub async fn add_stock(&self, product_id: i32, amount: i32) -> ProductResult<i32> {
        self.adjust("add", product_id, amount, Product::add_stock)
            .await
    }

    /// Remove `amount` units from a product and return the new stock level.
    ///
    /// Fails with [`ProductError::InsufficientStock`] without writing anything
    /// when the product holds fewer than `amount` units.
    #[instrument(skip(self))]
    pub async fn remove_stock(&self, product_id: i32, amount: i32) -> ProductResult<i32> {
        self.adjust("remove", product_id, amount, Product::remove_stock)
            .await
    }

    async fn adjust(
        &self,
        operation: &'static str,
        product_id: i32,
        amount: i32,
        apply: fn(&mut Product, i32) -> ProductResult<i32>,
    ) -> ProductResult<i32> {
        let started = Instant::now();

        let result = self.try_adjust(product_id, amount, apply).await;

        match &result {
            Ok(quantity_in_stock) => {
                tracing::info!(
                    product_id,
                    amount,
                    quantity_in_stock,
                    operation,
                    "Stock updated"
                );
                StockMetrics::record_committed(
                    operation,
                    product_id,
                    amount,
                    *quantity_in_stock,
                    started.elapsed().as_secs_f64(),
                );
            }
            Err(e) => {
                tracing::debug!(product_id, amount, operation, error = %e, "Stock update refused");
                StockMetrics::record_operation(operation, outcome_label(e));
            }
        }

        result
    }

    async fn try_adjust(
        &self,
        product_id: i32,
        amount: i32,
        apply: fn(&mut Product, i32) -> ProductResult<i32>,
    ) -> ProductResult<i32> {
        if amount < 0 {
            return Err(ProductError::Validation(format!(
                "Amount must be non-negative, got {}",
                amount
            )));
        }

        let mut product = self.get_product(product_id).await?;
        apply(&mut product, amount)?;

        let saved = self.repository.save(&product).await?;
        Ok(saved.quantity_in_stock)
    }
}

fn outcome_label(err: &ProductError) -> &'static str {
    match err {
        ProductError::NotFound { .. } => "not_found",
        ProductError::InsufficientStock { .. } => "insufficient_stock",
        ProductError::ConcurrentModification { .. } => "conflict",
        ProductError::Validation(_) => "invalid",
        ProductError::Internal(_) => "error",
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
