//! HTTP handlers for the product search API

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::models::{ProductHit, SearchResponse};
use crate::orchestrator::SearchOrchestrator;
use domain_vector::VectorRepository;

/// Request body for the chat recommendation endpoint
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// The customer's natural-language query
    #[serde(default)]
    pub message: Option<String>,
}

/// Query parameters for the plain search endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchParams {
    /// The customer's natural-language query
    #[serde(default)]
    pub q: Option<String>,
    /// Maximum number of candidates to consider
    pub limit: Option<u32>,
}

/// Search products and generate a recommendation
#[utoipa::path(
    post,
    path = "/chat",
    tag = "products",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Recommendation or no-results response", body = SearchResponse),
        (status = 400, description = "Empty or missing message", body = SearchResponse),
        (status = 500, description = "A pipeline stage failed", body = SearchResponse)
    )
)]
pub async fn chat<R: VectorRepository>(
    State(orchestrator): State<Arc<SearchOrchestrator<R>>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let response = orchestrator
        .handle_chat(request.message.as_deref().unwrap_or_default())
        .await;
    envelope_response(response)
}

/// Search products without recommendation text
#[utoipa::path(
    get,
    path = "/search",
    tag = "products",
    params(SearchParams),
    responses(
        (status = 200, description = "Relevant products, possibly empty", body = SearchResponse),
        (status = 400, description = "Empty or missing query", body = SearchResponse),
        (status = 500, description = "A pipeline stage failed", body = SearchResponse)
    )
)]
pub async fn search<R: VectorRepository>(
    State(orchestrator): State<Arc<SearchOrchestrator<R>>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let response = orchestrator
        .handle_search(params.q.as_deref().unwrap_or_default(), params.limit)
        .await;
    envelope_response(response)
}

/// Derive the HTTP status from the envelope.
///
/// The envelope is the contract: the body is always a full `SearchResponse`.
/// A failure with a null query can only be the pre-validation check; every
/// other failure happened inside the pipeline.
fn envelope_response(response: SearchResponse) -> (StatusCode, Json<SearchResponse>) {
    let status = if response.success {
        StatusCode::OK
    } else if response.query.is_none() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(response))
}

/// OpenAPI documentation for the product search API
#[derive(OpenApi)]
#[openapi(
    paths(chat, search),
    components(schemas(ChatRequest, SearchResponse, ProductHit)),
    tags(
        (name = "products", description = "Semantic product search and recommendations")
    )
)]
pub struct SearchApiDoc;

/// Create the search router with the orchestrator as shared state
pub fn router<R: VectorRepository + 'static>(
    orchestrator: Arc<SearchOrchestrator<R>>,
) -> Router {
    Router::new()
        .route("/chat", post(chat::<R>))
        .route("/search", get(search::<R>))
        .with_state(orchestrator)
}
