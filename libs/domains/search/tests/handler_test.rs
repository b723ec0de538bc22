//! Handler tests for the search domain
//!
//! These verify the HTTP layer over a mocked pipeline: request
//! deserialization, envelope-to-status mapping, and response serialization.
//! The full application wiring (routing under /api, middleware) is exercised
//! by the API binary, not here.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_search::{
    ChatMessage, CompletionProvider, HandlebarsPromptStore, SearchOrchestrator, SearchResult,
    handlers,
};
use domain_vector::models::{
    CollectionInfo, EmbeddingModel, EmbeddingProviderType, EmbeddingResult,
    SearchResult as VectorSearchResult, Vector, VectorConfig,
};
use domain_vector::{EmbeddingProvider, SearchQuery, VectorRepository, VectorResult};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

mockall::mock! {
    Repo {}

    #[async_trait]
    impl VectorRepository for Repo {
        async fn create_collection(&self, name: &str, config: VectorConfig) -> VectorResult<CollectionInfo>;
        async fn collection_exists(&self, name: &str) -> VectorResult<bool>;
        async fn delete_collection(&self, name: &str) -> VectorResult<bool>;
        async fn upsert_batch(&self, collection_name: &str, vectors: Vec<Vector>, wait: bool) -> VectorResult<Vec<Uuid>>;
        async fn search(&self, collection_name: &str, query: SearchQuery) -> VectorResult<Vec<VectorSearchResult>>;
        async fn ping(&self) -> VectorResult<()>;
    }
}

mockall::mock! {
    Embeddings {}

    #[async_trait]
    impl EmbeddingProvider for Embeddings {
        fn provider_type(&self) -> EmbeddingProviderType;
        async fn embed(&self, model: EmbeddingModel, text: &str) -> VectorResult<EmbeddingResult>;
        async fn embed_batch(&self, model: EmbeddingModel, texts: &[String]) -> VectorResult<Vec<EmbeddingResult>>;
    }
}

mockall::mock! {
    Completions {}

    #[async_trait]
    impl CompletionProvider for Completions {
        async fn complete(&self, messages: &[ChatMessage]) -> SearchResult<String>;
    }
}

fn app(
    repository: MockRepo,
    embeddings: MockEmbeddings,
    completions: MockCompletions,
) -> axum::Router {
    let orchestrator = SearchOrchestrator::new(
        Arc::new(repository),
        Arc::new(embeddings),
        Arc::new(completions),
        Arc::new(HandlebarsPromptStore::new().unwrap()),
        EmbeddingModel::Custom(3),
        "products".to_string(),
    );
    handlers::router(Arc::new(orchestrator))
}

fn embedding() -> EmbeddingResult {
    EmbeddingResult {
        values: vec![0.1, 0.2, 0.3],
        dimension: 3,
        tokens_used: 1,
    }
}

fn phone_x() -> VectorSearchResult {
    VectorSearchResult {
        id: Uuid::from_u128(1),
        distance: Some(0.2),
        payload: Some(json!({"name": "Phone X"})),
    }
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn chat_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_chat_returns_200_with_recommendation() {
    let mut embeddings = MockEmbeddings::new();
    embeddings.expect_embed().returning(|_, _| Ok(embedding()));

    let mut repository = MockRepo::new();
    repository
        .expect_search()
        .returning(|_, _| Ok(vec![phone_x()]));

    let mut completions = MockCompletions::new();
    completions
        .expect_complete()
        .returning(|_| Ok("Try Phone X.".to_string()));

    let response = app(repository, embeddings, completions)
        .oneshot(chat_request(json!({"message": "waterproof smartphone"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["query"], "waterproof smartphone");
    assert_eq!(body["response"], "Try Phone X.");
    assert_eq!(body["products"][0]["title"], "Phone X");
}

#[tokio::test]
async fn test_chat_empty_message_returns_400() {
    let response = app(MockRepo::new(), MockEmbeddings::new(), MockCompletions::new())
        .oneshot(chat_request(json!({"message": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["query"], Value::Null);
    assert_eq!(body["message"], "Message parameter is required");
}

#[tokio::test]
async fn test_chat_missing_message_field_returns_400() {
    let response = app(MockRepo::new(), MockEmbeddings::new(), MockCompletions::new())
        .oneshot(chat_request(json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_pipeline_failure_returns_500_with_envelope() {
    let mut embeddings = MockEmbeddings::new();
    embeddings.expect_embed().returning(|_, _| {
        Err(domain_vector::VectorError::Embedding(
            "connection refused".to_string(),
        ))
    });

    let response = app(MockRepo::new(), embeddings, MockCompletions::new())
        .oneshot(chat_request(json!({"message": "lamp"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["query"], "lamp");
    assert_eq!(
        body["message"],
        "An error occurred during search: connection refused"
    );
}

#[tokio::test]
async fn test_chat_no_results_is_200() {
    let mut embeddings = MockEmbeddings::new();
    embeddings.expect_embed().returning(|_, _| Ok(embedding()));

    let mut repository = MockRepo::new();
    repository.expect_search().returning(|_, _| Ok(vec![]));

    let response = app(repository, embeddings, MockCompletions::new())
        .oneshot(chat_request(json!({"message": "hovercraft"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], Value::Null);
    assert_eq!(body["products"], json!([]));
}

#[tokio::test]
async fn test_search_lists_products() {
    let mut embeddings = MockEmbeddings::new();
    embeddings.expect_embed().returning(|_, _| Ok(embedding()));

    let mut repository = MockRepo::new();
    repository
        .expect_search()
        .returning(|_, _| Ok(vec![phone_x()]));

    let response = app(repository, embeddings, MockCompletions::new())
        .oneshot(
            Request::builder()
                .uri("/search?q=waterproof%20smartphone&limit=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], Value::Null);
    assert_eq!(body["products"][0]["distance"], 0.2);
}

#[tokio::test]
async fn test_search_without_query_returns_400() {
    let response = app(MockRepo::new(), MockEmbeddings::new(), MockCompletions::new())
        .oneshot(
            Request::builder()
                .uri("/search")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
