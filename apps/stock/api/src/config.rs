//! Configuration for Stock API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig};
use database::sql::DatabaseConfig;
use strum::{Display, EnumString};

pub use core_config::Environment;

/// Where products are stored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreBackend {
    /// Seeded in-process map, lost on restart
    #[default]
    Memory,
    /// SQL database through sea-orm (`DATABASE_URL`)
    Database,
}

#[derive(Clone, Debug, Default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

impl FromEnv for StoreConfig {
    /// STORE_BACKEND: `memory` (default) or `database`
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            backend: env_parse("STORE_BACKEND", StoreBackend::default())?,
        })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub store: StoreConfig,
    /// Present only for the database backend
    pub database: Option<DatabaseConfig>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let store = StoreConfig::from_env()?;

        let database = match store.backend {
            StoreBackend::Database => Some(DatabaseConfig::from_env()?),
            StoreBackend::Memory => None,
        };

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            store,
            database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_memory_backend() {
        temp_env::with_vars(
            [
                ("STORE_BACKEND", None::<&str>),
                ("DATABASE_URL", None),
                ("PORT", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.store.backend, StoreBackend::Memory);
                assert!(config.database.is_none());
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.app.name, "stock_api");
            },
        );
    }

    #[test]
    fn test_database_backend_reads_database_url() {
        temp_env::with_vars(
            [
                ("STORE_BACKEND", Some("Database")),
                ("DATABASE_URL", Some("sqlite::memory:")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.store.backend, StoreBackend::Database);
                assert_eq!(config.database.unwrap().url(), "sqlite::memory:");
            },
        );
    }

    #[test]
    fn test_database_backend_requires_database_url() {
        temp_env::with_vars(
            [("STORE_BACKEND", Some("database")), ("DATABASE_URL", None)],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("DATABASE_URL"));
            },
        );
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        temp_env::with_var("STORE_BACKEND", Some("redis"), || {
            let err = StoreConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { .. }));
        });
    }

    #[test]
    fn test_backend_display() {
        assert_eq!(StoreBackend::Memory.to_string(), "memory");
        assert_eq!(StoreBackend::Database.to_string(), "database");
    }
}
