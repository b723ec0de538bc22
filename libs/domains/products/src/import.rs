//! Catalog import pipeline: parse XML, embed product text, upsert vectors.

use std::path::Path;

use domain_vector::service::IndexDocument;
use domain_vector::{VectorRepository, VectorService};
use tracing::{info, instrument, warn};

use crate::catalog::Catalog;
use crate::error::ProductResult;
use crate::models::{ImportSummary, Product};

/// How many products are embedded per provider call.
pub const EMBED_BATCH_SIZE: usize = 32;

/// Imports product catalogs into the vector collection.
///
/// Each product is embedded from its [`Product::embedding_text`] and stored
/// with its display payload; re-importing a catalog overwrites the existing
/// points because ids derive from the catalog ids.
pub struct ImportService<R: VectorRepository> {
    vector: VectorService<R>,
    collection_name: String,
}

impl<R: VectorRepository> ImportService<R> {
    pub fn new(vector: VectorService<R>, collection_name: String) -> Self {
        Self {
            vector,
            collection_name,
        }
    }

    /// Drop the collection so the next import starts from scratch.
    pub async fn reset(&self) -> ProductResult<()> {
        self.vector.reset_collection(&self.collection_name).await?;
        Ok(())
    }

    /// Import a catalog file from disk.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub async fn import_path(&self, path: impl AsRef<Path>) -> ProductResult<ImportSummary> {
        let catalog = Catalog::from_path(path)?;
        self.import_catalog(catalog).await
    }

    /// Import an already-parsed catalog.
    pub async fn import_catalog(&self, catalog: Catalog) -> ProductResult<ImportSummary> {
        let mut summary = ImportSummary {
            total: catalog.products.len(),
            ..Default::default()
        };

        let mut products: Vec<Product> = Vec::with_capacity(catalog.products.len());
        for entry in catalog.products {
            match entry.into_product() {
                Ok(product) => products.push(product),
                Err(e) => {
                    warn!("Skipping catalog entry: {}", e);
                    summary.skipped += 1;
                }
            }
        }

        if products.is_empty() {
            return Ok(summary);
        }

        self.vector.ensure_collection(&self.collection_name).await?;

        for chunk in products.chunks(EMBED_BATCH_SIZE) {
            let documents: Vec<IndexDocument> = chunk
                .iter()
                .map(|product| IndexDocument {
                    id: product.point_id(),
                    text: product.embedding_text(),
                    payload: Some(product.payload()),
                })
                .collect();

            let ids = self
                .vector
                .index_documents(&self.collection_name, documents)
                .await?;
            summary.imported += ids.len();
        }

        info!(
            total = summary.total,
            imported = summary.imported,
            skipped = summary.skipped,
            "Catalog import finished"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use domain_vector::models::{
        CollectionInfo, EmbeddingModel, EmbeddingProviderType, EmbeddingResult, SearchQuery,
        SearchResult, Vector, VectorConfig,
    };
    use domain_vector::{EmbeddingProvider, VectorResult};
    use std::sync::Arc;
    use uuid::Uuid;

    mockall::mock! {
        Repo {}

        #[async_trait]
        impl VectorRepository for Repo {
            async fn create_collection(&self, name: &str, config: VectorConfig) -> VectorResult<CollectionInfo>;
            async fn collection_exists(&self, name: &str) -> VectorResult<bool>;
            async fn delete_collection(&self, name: &str) -> VectorResult<bool>;
            async fn upsert_batch(&self, collection_name: &str, vectors: Vec<Vector>, wait: bool) -> VectorResult<Vec<Uuid>>;
            async fn search(&self, collection_name: &str, query: SearchQuery) -> VectorResult<Vec<SearchResult>>;
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

    const SAMPLE: &str = r#"
        <catalog>
          <product id="1">
            <name>Phone X</name>
            <description>Waterproof smartphone</description>
            <price>499.99</price>
          </product>
          <product id="2">
            <name> </name>
          </product>
          <product id="3">
            <name>Phone Y</name>
            <price>299</price>
          </product>
        </catalog>
    "#;

    fn import_service(
        repository: MockRepo,
        embeddings: MockEmbeddings,
    ) -> ImportService<MockRepo> {
        let vector = VectorService::new(
            Arc::new(repository),
            Arc::new(embeddings),
            EmbeddingModel::Custom(3),
        );
        ImportService::new(vector, "products".to_string())
    }

    #[tokio::test]
    async fn test_import_skips_invalid_and_imports_rest() {
        let mut embeddings = MockEmbeddings::new();
        embeddings.expect_embed_batch().times(1).returning(|_, texts| {
            Ok(texts
                .iter()
                .map(|_| EmbeddingResult {
                    values: vec![0.1, 0.2, 0.3],
                    dimension: 3,
                    tokens_used: 1,
                })
                .collect())
        });

        let mut repository = MockRepo::new();
        repository
            .expect_collection_exists()
            .returning(|_| Ok(true));
        repository
            .expect_upsert_batch()
            .withf(|name, vectors, _| name == "products" && vectors.len() == 2)
            .times(1)
            .returning(|_, vectors, _| Ok(vectors.iter().map(|v| v.id).collect()));

        let service = import_service(repository, embeddings);
        let catalog = Catalog::from_str(SAMPLE).unwrap();
        let summary = service.import_catalog(catalog).await.unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 1);
    }

    #[tokio::test]
    async fn test_import_empty_catalog_touches_nothing() {
        let mut repository = MockRepo::new();
        repository.expect_collection_exists().times(0);
        repository.expect_upsert_batch().times(0);

        let service = import_service(repository, MockEmbeddings::new());
        let catalog = Catalog::from_str("<catalog></catalog>").unwrap();
        let summary = service.import_catalog(catalog).await.unwrap();

        assert_eq!(summary.total, 0);
        assert_eq!(summary.imported, 0);
    }

    #[tokio::test]
    async fn test_import_creates_missing_collection() {
        let mut embeddings = MockEmbeddings::new();
        embeddings.expect_embed_batch().returning(|_, texts| {
            Ok(texts
                .iter()
                .map(|_| EmbeddingResult {
                    values: vec![0.0; 3],
                    dimension: 3,
                    tokens_used: 1,
                })
                .collect())
        });

        let mut repository = MockRepo::new();
        repository
            .expect_collection_exists()
            .returning(|_| Ok(false));
        repository
            .expect_create_collection()
            .withf(|name, config| name == "products" && config.dimension == 3)
            .times(1)
            .returning(|name, config| {
                Ok(CollectionInfo {
                    name: name.to_string(),
                    points_count: 0,
                    config,
                })
            });
        repository
            .expect_upsert_batch()
            .returning(|_, vectors, _| Ok(vectors.iter().map(|v| v.id).collect()));

        let service = import_service(repository, embeddings);
        let xml = r#"<catalog><product id="9"><name>Lamp</name></product></catalog>"#;
        let summary = service
            .import_catalog(Catalog::from_str(xml).unwrap())
            .await
            .unwrap();
        assert_eq!(summary.imported, 1);
    }
}
