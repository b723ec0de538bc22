//! Readiness endpoint

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use domain_vector::VectorRepository;

use crate::state::AppState;

/// Readiness check: verifies the vector store answers.
///
/// The embedding and completion providers are intentionally not probed; they
/// are reached lazily per request and failures surface in the response
/// envelope.
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let repository = state.repository.clone();
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "vector_store",
        Box::pin(async move { repository.ping().await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

pub fn ready_router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
