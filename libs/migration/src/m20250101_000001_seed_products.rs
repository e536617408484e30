use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Plain SQL so the same statement runs on PostgreSQL and SQLite
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO products (id, name, quantity_in_stock, version)
            VALUES
                (1, 'Banana', 50, 0),
                (2, 'Apple', 20, 0),
                (3, 'Habanero Pepper', 10, 0)
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM products WHERE id IN (1, 2, 3)")
            .await?;

        Ok(())
    }
}
