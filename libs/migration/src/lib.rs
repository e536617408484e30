pub use sea_orm_migration::prelude::*;

mod m20250101_000000_create_products;
mod m20250101_000001_seed_products;

pub use m20250101_000000_create_products::Products;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000000_create_products::Migration),
            Box::new(m20250101_000001_seed_products::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{
        ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
    };

    async fn memory_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        Database::connect(opt).await.unwrap()
    }

    #[tokio::test]
    async fn test_migrations_create_and_seed_products() {
        let db = memory_db().await;
        Migrator::up(&db, None).await.unwrap();

        let rows = db
            .query_all_raw(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT id, name, quantity_in_stock, version FROM products ORDER BY id",
            ))
            .await
            .unwrap();

        let seeded: Vec<(i32, String, i32, i64)> = rows
            .iter()
            .map(|row| {
                (
                    row.try_get("", "id").unwrap(),
                    row.try_get("", "name").unwrap(),
                    row.try_get("", "quantity_in_stock").unwrap(),
                    row.try_get("", "version").unwrap(),
                )
            })
            .collect();

        assert_eq!(
            seeded,
            vec![
                (1, "Banana".to_string(), 50, 0),
                (2, "Apple".to_string(), 20, 0),
                (3, "Habanero Pepper".to_string(), 10, 0),
            ]
        );
    }

    #[tokio::test]
    async fn test_migrations_roll_back_cleanly() {
        let db = memory_db().await;
        Migrator::up(&db, None).await.unwrap();
        Migrator::down(&db, None).await.unwrap();

        let manager = SchemaManager::new(&db);
        assert!(!manager.has_table("products").await.unwrap());
    }
}
