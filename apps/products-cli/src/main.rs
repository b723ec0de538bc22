//! Product Finder CLI
//!
//! Imports XML product catalogs and runs semantic searches and
//! recommendations against the same pipeline the API serves.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::Environment;
use domain_products::ImportService;
use domain_search::{
    CompletionProvider, HandlebarsPromptStore, OpenAIChatProvider, ProductHit, PromptStore,
    SearchOrchestrator, SearchResponse,
};
use domain_vector::{EmbeddingProvider, OpenAIProvider, QdrantRepository, VectorService};
use eyre::Result;
use tracing::info;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "products-cli")]
#[command(about = "Semantic product search and recommendations from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an XML product catalog into the vector collection
    Import {
        /// Path to the catalog file
        file: PathBuf,

        /// Drop the collection before importing
        #[arg(long)]
        reset: bool,
    },

    /// List relevant products for a query
    Search {
        /// The search query
        query: String,

        /// Maximum number of candidates to consider
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Recommend products for a query
    Chat {
        /// The search query
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();
    let config = Config::from_env()?;

    info!("Connecting to Qdrant at {}", config.qdrant.url);
    let repository = Arc::new(QdrantRepository::new(config.qdrant.clone()).await?);
    let embeddings: Arc<dyn EmbeddingProvider> = Arc::new(OpenAIProvider::from_env()?);

    match cli.command {
        Commands::Import { file, reset } => {
            let vector_service = VectorService::new(
                Arc::clone(&repository),
                embeddings,
                config.embedding_model,
            );
            let import = ImportService::new(vector_service, config.collection_name);

            if reset {
                import.reset().await?;
            }

            let summary = import.import_path(&file).await?;
            println!(
                "Imported {} of {} products ({} skipped)",
                summary.imported, summary.total, summary.skipped
            );
        }

        Commands::Search { query, limit } => {
            let orchestrator = orchestrator(&config, repository, embeddings)?;
            let response = orchestrator.handle_search(&query, limit).await;
            report(&response)?;
        }

        Commands::Chat { query } => {
            let orchestrator = orchestrator(&config, repository, embeddings)?;
            let response = orchestrator.handle_chat(&query).await;
            report(&response)?;
        }
    }

    Ok(())
}

fn orchestrator(
    config: &Config,
    repository: Arc<QdrantRepository>,
    embeddings: Arc<dyn EmbeddingProvider>,
) -> Result<SearchOrchestrator<QdrantRepository>> {
    let completions: Arc<dyn CompletionProvider> = Arc::new(OpenAIChatProvider::from_env()?);
    let prompts: Arc<dyn PromptStore> = Arc::new(HandlebarsPromptStore::from_env()?);

    Ok(SearchOrchestrator::new(
        repository,
        embeddings,
        completions,
        prompts,
        config.embedding_model,
        config.collection_name.clone(),
    ))
}

/// Print the response and fail the process when the pipeline failed.
fn report(response: &SearchResponse) -> Result<()> {
    if !response.success {
        let message = response
            .message
            .as_deref()
            .unwrap_or("Search failed")
            .to_string();
        eyre::bail!(message);
    }

    print_products(&response.products);

    if let Some(text) = &response.response {
        println!();
        println!("{}", text);
    }

    Ok(())
}

fn print_products(products: &[ProductHit]) {
    if products.is_empty() {
        return;
    }

    println!(
        "{:<4} {:<38} {:<32} {:>8}",
        "#", "ID", "Product Name", "Distance"
    );
    for (index, hit) in products.iter().enumerate() {
        println!(
            "{:<4} {:<38} {:<32} {:>8.4}",
            index + 1,
            hit.id.to_string(),
            hit.title,
            hit.distance
        );
    }
}
