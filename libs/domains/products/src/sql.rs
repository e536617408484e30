use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::Product,
    repository::ProductRepository,
};

/// Sea-ORM implementation of ProductRepository
///
/// Works against any backend the `database` crate connects to (PostgreSQL,
/// SQLite). Expects the `products` table from the `migration` crate.
#[derive(Clone)]
pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn save(&self, product: &Product) -> ProductResult<Product> {
        let next_version = product.version + 1;

        // Conditional update: only the writer holding the current version wins
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Name, Expr::value(product.name.clone()))
            .col_expr(
                entity::Column::QuantityInStock,
                Expr::value(product.quantity_in_stock),
            )
            .col_expr(entity::Column::Version, Expr::value(next_version))
            .filter(entity::Column::Id.eq(product.id))
            .filter(entity::Column::Version.eq(product.version))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return match self.get_by_id(product.id).await? {
                None => Err(ProductError::NotFound {
                    product_id: product.id,
                }),
                Some(stored) => {
                    tracing::warn!(
                        product_id = product.id,
                        expected_version = product.version,
                        stored_version = stored.version,
                        "Stale product write rejected"
                    );
                    Err(ProductError::ConcurrentModification {
                        product_id: product.id,
                    })
                }
            };
        }

        tracing::debug!(product_id = product.id, version = next_version, "Saved product");

        self.get_by_id(product.id)
            .await?
            .ok_or(ProductError::NotFound {
                product_id: product.id,
            })
    }
}
