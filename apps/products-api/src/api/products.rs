//! Product search and import routes

use axum::{extract::State, routing::post, Json, Router};
use domain_products::{ImportSummary, ProductError};
use domain_search::handlers;
use serde::Deserialize;
use utoipa::{OpenApi, ToSchema};

use crate::state::AppState;

/// Request body for the catalog import endpoint
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ImportRequest {
    /// Path of an XML catalog file readable by the server
    pub path: String,
}

/// Import an XML product catalog into the vector collection
#[utoipa::path(
    post,
    path = "/import",
    tag = "products",
    request_body = ImportRequest,
    responses(
        (status = 200, description = "Import summary", body = ImportSummary),
        (status = 400, description = "Unreadable or malformed catalog"),
        (status = 500, description = "Embedding or vector store failure")
    )
)]
pub async fn import_catalog(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportSummary>, ProductError> {
    let summary = state.import.import_path(&request.path).await?;
    Ok(Json(summary))
}

/// OpenAPI documentation for the import endpoint
#[derive(OpenApi)]
#[openapi(
    paths(import_catalog),
    components(schemas(ImportRequest, ImportSummary))
)]
pub struct ImportApiDoc;

/// Create products router
pub fn router(state: &AppState) -> Router {
    Router::new()
        .route("/import", post(import_catalog))
        .with_state(state.clone())
        .merge(handlers::router(state.orchestrator.clone()))
}
