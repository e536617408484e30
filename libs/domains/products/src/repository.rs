use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, seed_products};

/// Repository trait for Product persistence
///
/// Implementations: [`InMemoryProductRepository`] and
/// [`SeaOrmProductRepository`](crate::sql::SeaOrmProductRepository).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Get a product by ID; `Ok(None)` when it does not exist
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// All products ordered by ID
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Persist a fetched-and-mutated product.
    ///
    /// Succeeds only if the stored version still equals `product.version`.
    /// The stored version becomes `product.version + 1` and the stored
    /// product is returned. A version mismatch fails with
    /// [`ProductError::ConcurrentModification`], a missing row with
    /// [`ProductError::NotFound`]; nothing is written in either case.
    async fn save(&self, product: &Product) -> ProductResult<Product>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<i32, Product>>>,
}

impl InMemoryProductRepository {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the startup catalog (Banana, Apple, Habanero Pepper)
    pub fn seeded() -> Self {
        Self::with_products(seed_products())
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products.values().cloned().collect();
        result.sort_by_key(|p| p.id);

        Ok(result)
    }

    async fn save(&self, product: &Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let stored = products.get_mut(&product.id).ok_or(ProductError::NotFound {
            product_id: product.id,
        })?;

        if stored.version != product.version {
            tracing::warn!(
                product_id = product.id,
                expected_version = product.version,
                stored_version = stored.version,
                "Stale product write rejected"
            );
            return Err(ProductError::ConcurrentModification {
                product_id: product.id,
            });
        }

        *stored = Product {
            version: product.version + 1,
            ..product.clone()
        };

        tracing::debug!(product_id = product.id, version = stored.version, "Saved product");
        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_list_is_ordered() {
        let repo = InMemoryProductRepository::seeded();

        let ids: Vec<i32> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.get_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_bumps_version() {
        let repo = InMemoryProductRepository::seeded();

        let mut product = repo.get_by_id(2).await.unwrap().unwrap();
        product.quantity_in_stock = 25;

        let saved = repo.save(&product).await.unwrap();
        assert_eq!(saved.version, 1);
        assert_eq!(saved.quantity_in_stock, 25);

        let fetched = repo.get_by_id(2).await.unwrap().unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_stale_save_is_rejected() {
        let repo = InMemoryProductRepository::seeded();

        let mut first = repo.get_by_id(3).await.unwrap().unwrap();
        let mut second = first.clone();

        first.quantity_in_stock = 0;
        repo.save(&first).await.unwrap();

        second.quantity_in_stock = 5;
        let result = repo.save(&second).await;
        assert!(matches!(
            result,
            Err(ProductError::ConcurrentModification { product_id: 3 })
        ));

        let stored = repo.get_by_id(3).await.unwrap().unwrap();
        assert_eq!(stored.quantity_in_stock, 0);
    }

    #[tokio::test]
    async fn test_save_missing_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let result = repo.save(&Product::new(9, "Ghost", 1)).await;
        assert!(matches!(result, Err(ProductError::NotFound { product_id: 9 })));
    }
}
