//! Product Finder API - semantic product search with AI recommendations

use std::sync::Arc;

use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::ImportService;
use domain_search::{
    CompletionProvider, HandlebarsPromptStore, OpenAIChatProvider, PromptStore, SearchOrchestrator,
};
use domain_vector::{EmbeddingProvider, OpenAIProvider, QdrantRepository, VectorService};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to Qdrant at {}", config.qdrant.url);
    let repository = Arc::new(QdrantRepository::new(config.qdrant.clone()).await?);

    let embeddings: Arc<dyn EmbeddingProvider> = Arc::new(OpenAIProvider::from_env()?);
    let completions: Arc<dyn CompletionProvider> = Arc::new(OpenAIChatProvider::from_env()?);
    let prompts: Arc<dyn PromptStore> = Arc::new(HandlebarsPromptStore::from_env()?);

    let vector_service = VectorService::new(
        Arc::clone(&repository),
        Arc::clone(&embeddings),
        config.embedding_model,
    );
    vector_service
        .ensure_collection(&config.collection_name)
        .await?;

    let orchestrator = Arc::new(SearchOrchestrator::new(
        Arc::clone(&repository),
        Arc::clone(&embeddings),
        completions,
        prompts,
        config.embedding_model,
        config.collection_name.clone(),
    ));
    let import = Arc::new(ImportService::new(
        vector_service,
        config.collection_name.clone(),
    ));

    let state = AppState {
        config: config.clone(),
        repository,
        orchestrator,
        import,
    };

    // Build REST router
    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router
        .merge(health_router(config.app))
        .merge(api::health::ready_router(state.clone()));

    info!("Starting Product Finder API on port {}", config.server.port);

    create_app(app, &config.server).await?;

    info!("Product Finder API shutdown complete");
    Ok(())
}
