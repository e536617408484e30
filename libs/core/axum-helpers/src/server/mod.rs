//! Server infrastructure: router assembly with OpenAPI docs, health
//! endpoints and graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use axum_helpers::http::cors_layer_for;
//! use core_config::app_info;
//!
//! let cors = cors_layer_for(&config.server.cors_allowed_origins, true)?;
//! let app = create_router::<ApiDoc>(api_routes, cors).merge(health_router(app_info!()));
//!
//! create_production_app(app, &config.server, config.server.shutdown_timeout(), async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router, serve_until};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
