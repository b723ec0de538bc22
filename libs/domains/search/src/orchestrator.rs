//! The end-to-end search-and-recommendation pipeline.
//!
//! One request flows: query → embedding → vector search → relevance filter →
//! prompt → chat completion → response envelope. The orchestrator owns the
//! short-circuits (empty query, no results) and translates every collaborator
//! fault into the uniform envelope; no error and no panic crosses this
//! boundary.

use std::sync::Arc;

use domain_vector::{EmbeddingModel, EmbeddingProvider, SearchQuery, VectorRepository};
use tracing::{info, instrument, warn};

use crate::completion::CompletionProvider;
use crate::error::{SearchError, SearchResult};
use crate::filter::RelevanceFilter;
use crate::models::{
    CHAT_RESULT_LIMIT, ProductMatch, SEARCH_RESULT_LIMIT, SearchResponse,
};
use crate::prompt_builder::RecommendationPromptBuilder;
use crate::prompts::PromptStore;

/// Failure message for an empty or missing query.
pub const MISSING_QUERY_MESSAGE: &str = "Message parameter is required";

/// Prefix of every collaborator-failure message; the suffix is the cause.
const PIPELINE_ERROR_PREFIX: &str = "An error occurred during search";

/// Coordinates the full query-to-response pipeline.
///
/// Stateless: safe to share across request handlers without coordination.
/// The three collaborator calls are strictly sequential, each feeding the
/// next; nothing is retried.
pub struct SearchOrchestrator<R: VectorRepository> {
    repository: Arc<R>,
    embeddings: Arc<dyn EmbeddingProvider>,
    completions: Arc<dyn CompletionProvider>,
    prompt_builder: RecommendationPromptBuilder,
    model: EmbeddingModel,
    collection_name: String,
}

impl<R: VectorRepository> SearchOrchestrator<R> {
    pub fn new(
        repository: Arc<R>,
        embeddings: Arc<dyn EmbeddingProvider>,
        completions: Arc<dyn CompletionProvider>,
        prompts: Arc<dyn PromptStore>,
        model: EmbeddingModel,
        collection_name: String,
    ) -> Self {
        Self {
            repository,
            embeddings,
            completions,
            prompt_builder: RecommendationPromptBuilder::new(prompts),
            model,
            collection_name,
        }
    }

    /// Run the recommendation pipeline for a chat query.
    ///
    /// Always returns a well-formed envelope:
    /// - empty query → `success=false` without touching any collaborator
    /// - nothing found, or nothing relevant enough → `success=true` with the
    ///   configurable no-results message (deliberately the same for both)
    /// - collaborator fault → `success=false` with the cause in `message`
    #[instrument(skip(self))]
    pub async fn handle_chat(&self, query: &str) -> SearchResponse {
        let Some(query) = normalize_query(query) else {
            return SearchResponse::failure(None, MISSING_QUERY_MESSAGE);
        };

        match self.run_chat(&query).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Recommendation pipeline failed: {}", e);
                SearchResponse::failure(
                    Some(query),
                    format!("{}: {}", PIPELINE_ERROR_PREFIX, e.cause()),
                )
            }
        }
    }

    /// Run the plain search listing: same pipeline without the completion
    /// step. An empty result list is a successful, empty listing.
    #[instrument(skip(self))]
    pub async fn handle_search(&self, query: &str, limit: Option<u32>) -> SearchResponse {
        let Some(query) = normalize_query(query) else {
            return SearchResponse::failure(None, MISSING_QUERY_MESSAGE);
        };

        let limit = limit.unwrap_or(SEARCH_RESULT_LIMIT);
        match self.run_search(&query, limit).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Search pipeline failed: {}", e);
                SearchResponse::failure(
                    Some(query),
                    format!("{}: {}", PIPELINE_ERROR_PREFIX, e.cause()),
                )
            }
        }
    }

    async fn run_chat(&self, query: &str) -> SearchResult<SearchResponse> {
        let candidates = self.search_candidates(query, CHAT_RESULT_LIMIT).await?;
        if candidates.is_empty() {
            return self.no_results(query);
        }

        let relevant = RelevanceFilter::filter(candidates);
        if relevant.is_empty() {
            // "nothing matched at all" and "nothing matched well enough"
            // collapse to the identical user-facing outcome
            return self.no_results(query);
        }

        let messages = self.prompt_builder.build(query, &relevant)?;
        let text = self.completions.complete(&messages).await?;

        info!(products = relevant.len(), "Produced recommendation");
        Ok(SearchResponse::recommendation(
            query.to_string(),
            text,
            &relevant,
        ))
    }

    async fn run_search(&self, query: &str, limit: u32) -> SearchResult<SearchResponse> {
        let candidates = self.search_candidates(query, limit).await?;
        let relevant = RelevanceFilter::filter(candidates);
        Ok(SearchResponse::listing(query.to_string(), &relevant))
    }

    async fn search_candidates(
        &self,
        query: &str,
        limit: u32,
    ) -> SearchResult<Vec<ProductMatch>> {
        let embedding = self.embeddings.embed(self.model, query).await?;

        let search = SearchQuery::new(embedding.values, limit);
        let results = self
            .repository
            .search(&self.collection_name, search)
            .await?;

        Ok(results.into_iter().map(ProductMatch::from).collect())
    }

    fn no_results(&self, query: &str) -> SearchResult<SearchResponse> {
        let text = self.prompt_builder.no_results_message()?;
        Ok(SearchResponse::no_results(query.to_string(), text))
    }
}

fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
