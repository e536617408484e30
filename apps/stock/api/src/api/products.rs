//! Products API routes

use axum::Router;
use domain_products::{
    ProductRepository, ProductResult, ProductService, SeaOrmProductRepository, handlers,
};
use observability::StockMetrics;

use crate::state::{AppState, Store};

/// Create products router for the configured store
pub fn router(state: &AppState) -> Router {
    match &state.store {
        Store::Memory(repository) => handlers::router(ProductService::new(repository.clone())),
        Store::Database(db) => {
            handlers::router(ProductService::new(SeaOrmProductRepository::new(db.clone())))
        }
    }
}

/// Publish the current stock level of every product as a gauge
pub async fn record_stock_levels(state: &AppState) -> ProductResult<usize> {
    match &state.store {
        Store::Memory(repository) => record_levels(repository).await,
        Store::Database(db) => record_levels(&SeaOrmProductRepository::new(db.clone())).await,
    }
}

async fn record_levels<R: ProductRepository>(repository: &R) -> ProductResult<usize> {
    let products = repository.list().await?;
    for product in &products {
        StockMetrics::set_quantity(product.id, product.quantity_in_stock);
    }
    Ok(products.len())
}
