//! SQL test infrastructure
//!
//! `TestDatabase` is an in-memory SQLite database with the workspace
//! migrations applied, so repository tests need no running server.

use database::sql::{self, DatabaseConfig};
use migration::Migrator;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, Statement};

const MEMORY_URL: &str = "sqlite::memory:";

/// Isolated database per instance; dropped with the last connection clone.
pub struct TestDatabase {
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    /// Fresh database with schema and seed data (Banana, Apple, Habanero Pepper).
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// let conn = db.connection();
    /// # }
    /// ```
    pub async fn new() -> Self {
        let connection = sql::connect_from_config(DatabaseConfig::new(MEMORY_URL))
            .await
            .expect("Failed to open in-memory SQLite database");

        sql::run_migrations::<Migrator>(&connection, "test")
            .await
            .expect("Failed to run migrations on test database");

        tracing::debug!("Test database ready (SQLite in memory)");

        Self { connection }
    }

    /// Same as [`TestDatabase::new`] but with the seeded products removed.
    pub async fn empty() -> Self {
        let db = Self::new().await;
        db.execute("DELETE FROM products")
            .await
            .expect("Failed to clear seeded products");
        db
    }

    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run a raw statement; handy for arranging rows a test needs.
    pub async fn execute(&self, sql: &str) -> Result<u64, DbErr> {
        let result = self.connection.execute_unprepared(sql).await?;
        Ok(result.rows_affected())
    }

    /// Insert a product row at version 0.
    pub async fn insert_product(&self, id: i32, name: &str, quantity_in_stock: i32) {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO products (id, name, quantity_in_stock, version) VALUES (?, ?, ?, 0)",
            [id.into(), name.into(), quantity_in_stock.into()],
        );
        self.connection
            .execute_raw(stmt)
            .await
            .unwrap_or_else(|e| panic!("Failed to insert product {}: {}", id, e));
    }

    /// Current `(quantity_in_stock, version)` of a row, read behind the
    /// repository's back.
    pub async fn stock_row(&self, id: i32) -> Option<(i32, i64)> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT quantity_in_stock, version FROM products WHERE id = ?",
            [id.into()],
        );
        let row = self
            .connection
            .query_one_raw(stmt)
            .await
            .expect("Failed to query product row")?;

        Some((
            row.try_get("", "quantity_in_stock").expect("quantity_in_stock column"),
            row.try_get("", "version").expect("version column"),
        ))
    }
}
