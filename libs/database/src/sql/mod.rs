//! SQL connector and utilities (PostgreSQL and SQLite via SeaORM)
//!
//! Provides connection management, migration running and the readiness probe.

mod config;
mod connector;
mod health;

pub use config::DatabaseConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_options,
    run_migrations,
};
pub use health::{check_health, check_health_detailed, HealthStatus};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
