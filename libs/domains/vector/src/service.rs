use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::embedding::EmbeddingProvider;
use crate::error::{VectorError, VectorResult};
use crate::models::{EmbeddingModel, Vector, VectorConfig};
use crate::repository::VectorRepository;

/// A document to index: the text is embedded, the payload is stored verbatim
/// alongside the resulting vector.
#[derive(Debug, Clone)]
pub struct IndexDocument {
    pub id: Uuid,
    pub text: String,
    pub payload: Option<serde_json::Value>,
}

/// Vector service providing high-level operations
///
/// Combines vector storage (Qdrant) with embedding generation.
pub struct VectorService<R: VectorRepository> {
    repository: Arc<R>,
    embeddings: Arc<dyn EmbeddingProvider>,
    model: EmbeddingModel,
}

impl<R: VectorRepository> VectorService<R> {
    pub fn new(repository: Arc<R>, embeddings: Arc<dyn EmbeddingProvider>, model: EmbeddingModel) -> Self {
        Self {
            repository,
            embeddings,
            model,
        }
    }

    /// Create the collection if it does not exist yet.
    ///
    /// The collection dimension is taken from the configured embedding model,
    /// which keeps inserts and searches dimension-compatible.
    #[instrument(skip(self))]
    pub async fn ensure_collection(&self, name: &str) -> VectorResult<()> {
        if self.repository.collection_exists(name).await? {
            return Ok(());
        }

        let config = VectorConfig::new(self.model.dimension());
        self.repository.create_collection(name, config).await?;
        info!(collection = name, "Created vector collection");
        Ok(())
    }

    /// Embed a batch of documents and upsert them into the collection.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn index_documents(
        &self,
        collection_name: &str,
        documents: Vec<IndexDocument>,
    ) -> VectorResult<Vec<Uuid>> {
        if documents.is_empty() {
            return Ok(vec![]);
        }

        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let embeddings = self.embeddings.embed_batch(self.model, &texts).await?;

        if embeddings.len() != documents.len() {
            return Err(VectorError::Embedding(format!(
                "Expected {} embeddings, got {}",
                documents.len(),
                embeddings.len()
            )));
        }

        let expected_dimension = self.model.dimension();
        let vectors: Vec<Vector> = documents
            .into_iter()
            .zip(embeddings)
            .map(|(doc, embedding)| {
                if embedding.dimension != expected_dimension {
                    return Err(VectorError::Validation(format!(
                        "Embedding dimension {} does not match collection dimension {}",
                        embedding.dimension, expected_dimension
                    )));
                }

                let mut vector = Vector::new(doc.id, embedding.values);
                if let Some(payload) = doc.payload {
                    vector = vector.with_payload(payload);
                }
                Ok(vector)
            })
            .collect::<VectorResult<_>>()?;

        self.repository
            .upsert_batch(collection_name, vectors, true)
            .await
    }

    /// Drop the collection if it exists. The next [`ensure_collection`]
    /// recreates it empty.
    ///
    /// [`ensure_collection`]: VectorService::ensure_collection
    #[instrument(skip(self))]
    pub async fn reset_collection(&self, name: &str) -> VectorResult<()> {
        if self.repository.collection_exists(name).await? {
            self.repository.delete_collection(name).await?;
            info!(collection = name, "Dropped vector collection");
        }
        Ok(())
    }
}

impl<R: VectorRepository> Clone for VectorService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            embeddings: Arc::clone(&self.embeddings),
            model: self.model,
        }
    }
}
