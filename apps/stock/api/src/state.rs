//! Application state management

use database::sql::{self, DatabaseConnection};
use domain_products::InMemoryProductRepository;
use migration::Migrator;
use tracing::info;

use crate::config::{Config, StoreBackend};

/// Backing store selected at startup
#[derive(Clone)]
pub enum Store {
    Memory(InMemoryProductRepository),
    Database(DatabaseConnection),
}

impl Store {
    /// Build the configured store. The SQL backend is connected with retry
    /// and migrated, which also seeds the catalog.
    pub async fn connect(config: &Config) -> eyre::Result<Self> {
        match (config.store.backend, &config.database) {
            (StoreBackend::Memory, _) => {
                info!("Using in-memory product store");
                Ok(Store::Memory(InMemoryProductRepository::seeded()))
            }
            (StoreBackend::Database, Some(db_config)) => {
                let db = sql::connect_from_config_with_retry(db_config.clone(), None).await?;
                sql::run_migrations::<Migrator>(&db, config.app.name).await?;
                Ok(Store::Database(db))
            }
            (StoreBackend::Database, None) => {
                Err(eyre::eyre!("STORE_BACKEND=database requires DATABASE_URL"))
            }
        }
    }

    /// Release backend resources on shutdown
    pub async fn close(self) {
        match self {
            Store::Memory(_) => {}
            Store::Database(db) => {
                info!("Shutting down: closing database connections");
                if let Err(e) = db.close().await {
                    tracing::warn!("Failed to close database connections: {}", e);
                }
                info!("Database connections closed");
            }
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Store,
}
