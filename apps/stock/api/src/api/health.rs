//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::{AppState, Store};

/// `GET /ready`: 200 when the store answers, 503 otherwise
async fn ready(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture)> = match &state.store {
        Store::Memory(_) => vec![("store", Box::pin(async { Ok(()) }))],
        Store::Database(db) => vec![(
            "database",
            Box::pin(async move {
                let status = database::sql::check_health_detailed(db).await;
                tracing::debug!(
                    response_time_ms = status.response_time_ms,
                    "Database readiness probe"
                );
                if status.healthy {
                    Ok(())
                } else {
                    Err(status.message.unwrap_or_default())
                }
            }),
        )],
    };

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
