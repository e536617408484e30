use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ProductError, ProductResult};

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID, immutable once created
    pub id: i32,
    pub name: String,
    /// Units available, never negative
    pub quantity_in_stock: i32,
    /// Optimistic concurrency token, bumped on every save
    #[serde(skip)]
    pub version: i64,
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Banana")]
    pub name: String,
    #[schema(example = 50)]
    pub quantity_in_stock: i32,
}

/// Body of the add-stocks and remove-stocks requests
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema)]
pub struct StockAdjustment {
    /// Number of units to add or remove
    #[validate(range(min = 0))]
    #[schema(minimum = 0, example = 10)]
    pub amount: i32,
}

/// Stock level after a successful adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockLevelResponse {
    #[schema(example = 20)]
    pub quantity_in_stock: i32,
}

impl Product {
    pub fn new(id: i32, name: impl Into<String>, quantity_in_stock: i32) -> Self {
        Self {
            id,
            name: name.into(),
            quantity_in_stock,
            version: 0,
        }
    }

    /// Add `amount` units and return the new level.
    ///
    /// Leaves the product untouched on error.
    pub fn add_stock(&mut self, amount: i32) -> ProductResult<i32> {
        ensure_non_negative(amount)?;

        self.quantity_in_stock = self.quantity_in_stock.checked_add(amount).ok_or_else(|| {
            ProductError::Validation(format!(
                "Adding {} units to product {} overflows the stock level",
                amount, self.id
            ))
        })?;

        Ok(self.quantity_in_stock)
    }

    /// Remove `amount` units and return the new level.
    ///
    /// Removing exactly what is in stock is allowed and leaves zero. Removing
    /// more fails with [`ProductError::InsufficientStock`] and leaves the
    /// product untouched.
    pub fn remove_stock(&mut self, amount: i32) -> ProductResult<i32> {
        ensure_non_negative(amount)?;

        let resulting = self.quantity_in_stock - amount;
        if resulting < 0 {
            return Err(ProductError::InsufficientStock {
                product_id: self.id,
                amount_requested: amount,
                quantity_in_stock: self.quantity_in_stock,
            });
        }

        self.quantity_in_stock = resulting;
        Ok(resulting)
    }
}

fn ensure_non_negative(amount: i32) -> ProductResult<()> {
    if amount < 0 {
        return Err(ProductError::Validation(format!(
            "Amount must be non-negative, got {}",
            amount
        )));
    }
    Ok(())
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            quantity_in_stock: product.quantity_in_stock,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            quantity_in_stock: product.quantity_in_stock,
        }
    }
}

/// Catalog loaded at startup by the in-memory store.
///
/// The SQL store gets the same rows from the seed migration.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new(1, "Banana", 50),
        Product::new(2, "Apple", 20),
        Product::new(3, "Habanero Pepper", 10),
    ]
}
