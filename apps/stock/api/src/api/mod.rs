//! API routes module

pub mod health;
pub mod products;

use axum::{Router, middleware, routing::get};
use axum_helpers::{cors_layer_for, create_router, health_router};
use observability::{metrics_handler, metrics_middleware};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Full application: API, docs, `/health`, `/ready` and `/metrics`
pub fn app(state: &AppState) -> std::io::Result<Router> {
    let config = &state.config;
    let cors = cors_layer_for(
        &config.server.cors_allowed_origins,
        config.environment.is_production(),
    )?;

    let router = create_router::<ApiDoc>(routes(state), cors)
        .merge(health_router(config.app))
        .merge(health::router(state.clone()))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(metrics_middleware));

    Ok(router)
}
