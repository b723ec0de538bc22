//! Configuration for the Product Finder CLI

use domain_vector::{EmbeddingModel, QdrantConfig};

/// CLI configuration, read once from the environment
#[derive(Clone, Debug)]
pub struct Config {
    pub qdrant: QdrantConfig,
    pub collection_name: String,
    pub embedding_model: EmbeddingModel,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let qdrant = QdrantConfig::from_env()?;

        let collection_name =
            std::env::var("COLLECTION_NAME").unwrap_or_else(|_| "products".to_string());

        let embedding_model = std::env::var("OPENAI_EMBEDDING_MODEL")
            .map(|name| EmbeddingModel::parse(&name))
            .unwrap_or_default();

        Ok(Self {
            qdrant,
            collection_name,
            embedding_model,
        })
    }
}
