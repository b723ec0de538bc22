//! Configuration for the Product Finder API

use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use domain_vector::{EmbeddingModel, QdrantConfig};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub qdrant: QdrantConfig,
    pub collection_name: String,
    pub embedding_model: EmbeddingModel,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let qdrant = QdrantConfig::from_env()?;

        let collection_name =
            std::env::var("COLLECTION_NAME").unwrap_or_else(|_| "products".to_string());

        let embedding_model = std::env::var("OPENAI_EMBEDDING_MODEL")
            .map(|name| EmbeddingModel::parse(&name))
            .unwrap_or_default();

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            qdrant,
            collection_name,
            embedding_model,
        })
    }
}
