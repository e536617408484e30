//! Stock API - REST server for product stock levels

use axum_helpers::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::{AppState, Store};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    observability::init_metrics()?;

    info!(backend = %config.store.backend, "Selecting product store");
    let store = Store::connect(&config).await?;

    let state = AppState {
        config: config.clone(),
        store,
    };

    let products = api::products::record_stock_levels(&state).await?;
    info!(products, "Product catalog loaded");

    let app = api::app(&state)?;

    info!(
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );

    create_production_app(
        app,
        &config.server,
        config.server.shutdown_timeout(),
        state.store.close(),
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Stock API shutdown complete");
    Ok(())
}
