//! OpenAI embeddings provider.
//!
//! Product catalog text arrives here raw: XML-extracted descriptions carry
//! newlines and indentation, and nothing upstream bounds their length. The
//! provider normalizes and truncates every input before it goes on the wire
//! so identical products always embed identically and oversized descriptions
//! cannot fail the whole batch.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::EmbeddingProvider;
use crate::error::{VectorError, VectorResult};
use crate::models::{EmbeddingModel, EmbeddingProviderType, EmbeddingResult};

/// Inputs longer than this are cut before embedding. Roughly 2k tokens of
/// catalog text, well under the 8191-token model limit.
const MAX_INPUT_CHARS: usize = 8000;

/// OpenAI embedding provider configuration
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn from_env() -> VectorResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| VectorError::Config("OPENAI_API_KEY not set".to_string()))?;

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let timeout_secs = std::env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            api_key,
            base_url,
            timeout_secs,
        })
    }
}

/// OpenAI embeddings provider
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> VectorResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VectorError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> VectorResult<Self> {
        Self::new(OpenAIConfig::from_env()?)
    }

    async fn request_embeddings(
        &self,
        model: EmbeddingModel,
        input: Vec<String>,
    ) -> VectorResult<EmbeddingResponse> {
        let request = EmbeddingRequest {
            model: model.model_name(),
            input,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VectorError::Embedding(format!(
                "OpenAI API error ({}): {}",
                status,
                api_error_message(&body)
            )));
        }

        Ok(response.json().await?)
    }
}

/// Normalize text the way the collection expects it: collapsed whitespace,
/// bounded length. The same product must produce the same input bytes no
/// matter how the catalog XML was indented.
fn prepare_input(text: &str) -> String {
    let normalized: Vec<&str> = text.split_whitespace().collect();
    let mut input = normalized.join(" ");

    if input.chars().count() > MAX_INPUT_CHARS {
        warn!(chars = input.chars().count(), "Truncating oversized embedding input");
        input = input.chars().take(MAX_INPUT_CHARS).collect();
    }

    input
}

/// Pull `error.message` out of an OpenAI error body, falling back to the raw
/// body when it is not the documented shape.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
    usage: EmbeddingUsage,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingUsage {
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn provider_type(&self) -> EmbeddingProviderType {
        EmbeddingProviderType::OpenAI
    }

    async fn embed(&self, model: EmbeddingModel, text: &str) -> VectorResult<EmbeddingResult> {
        let results = self.embed_batch(model, &[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| VectorError::Embedding("No embedding returned".to_string()))
    }

    async fn embed_batch(
        &self,
        model: EmbeddingModel,
        texts: &[String],
    ) -> VectorResult<Vec<EmbeddingResult>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let input: Vec<String> = texts.iter().map(|t| prepare_input(t)).collect();
        let response = self.request_embeddings(model, input).await?;

        if response.data.len() != texts.len() {
            return Err(VectorError::Embedding(format!(
                "Requested {} embeddings, provider returned {}",
                texts.len(),
                response.data.len()
            )));
        }

        debug!(
            model = model.model_name(),
            count = texts.len(),
            tokens = response.usage.total_tokens,
            "Generated embeddings"
        );

        // Order by input index; usage is only reported per batch
        let tokens_per_embedding = response.usage.total_tokens.div_ceil(texts.len() as u32);
        let mut data = response.data;
        data.sort_by_key(|d| d.index);

        data.into_iter()
            .map(|d| {
                if d.embedding.is_empty() {
                    return Err(VectorError::Embedding(
                        "Provider returned an empty embedding".to_string(),
                    ));
                }

                Ok(EmbeddingResult {
                    dimension: d.embedding.len() as u32,
                    values: d.embedding,
                    tokens_used: tokens_per_embedding,
                })
            })
            .collect()
    }
}
