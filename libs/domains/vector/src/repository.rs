use async_trait::async_trait;
use uuid::Uuid;

use crate::error::VectorResult;
use crate::models::{CollectionInfo, SearchQuery, SearchResult, Vector, VectorConfig};

/// Repository trait for vector storage operations
///
/// This trait abstracts the underlying vector database (Qdrant).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorRepository: Send + Sync {
    /// Create a new collection with the given configuration
    async fn create_collection(
        &self,
        name: &str,
        config: VectorConfig,
    ) -> VectorResult<CollectionInfo>;

    /// Check whether a collection exists
    async fn collection_exists(&self, name: &str) -> VectorResult<bool>;

    /// Delete a collection
    async fn delete_collection(&self, name: &str) -> VectorResult<bool>;

    /// Upsert vectors in batch
    async fn upsert_batch(
        &self,
        collection_name: &str,
        vectors: Vec<Vector>,
        wait: bool,
    ) -> VectorResult<Vec<Uuid>>;

    /// Search for similar vectors, nearest first
    async fn search(
        &self,
        collection_name: &str,
        query: SearchQuery,
    ) -> VectorResult<Vec<SearchResult>>;

    /// Check connectivity to the backing store
    async fn ping(&self) -> VectorResult<()>;
}
