use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distance metric for similarity calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Euclidean,
    DotProduct,
}

/// Vector collection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorConfig {
    pub dimension: u32,
    pub distance: DistanceMetric,
}

impl VectorConfig {
    pub fn new(dimension: u32) -> Self {
        Self {
            dimension,
            distance: DistanceMetric::default(),
        }
    }

    pub fn with_distance(mut self, distance: DistanceMetric) -> Self {
        self.distance = distance;
        self
    }
}

/// Collection information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub points_count: u64,
    pub config: VectorConfig,
}

/// A vector point with payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vector {
    pub id: Uuid,
    pub values: Vec<f32>,
    pub payload: Option<serde_json::Value>,
}

impl Vector {
    pub fn new(id: Uuid, values: Vec<f32>) -> Self {
        Self {
            id,
            values,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Search request against a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub vector: Vec<f32>,
    pub limit: u32,
    pub with_payloads: bool,
}

impl SearchQuery {
    pub fn new(vector: Vec<f32>, limit: u32) -> Self {
        Self {
            vector,
            limit,
            with_payloads: true,
        }
    }
}

/// One nearest-neighbor match.
///
/// `distance` uses the cosine-distance convention: 0 means identical, larger
/// means less similar. Backends that report similarity scores convert at the
/// repository boundary. A missing distance means the backend returned no
/// relevance signal for the point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: Uuid,
    pub distance: Option<f32>,
    pub payload: Option<serde_json::Value>,
}

/// Supported embedding providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderType {
    #[default]
    OpenAI,
    Custom,
}

/// Embedding models with their fixed output dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingModel {
    /// OpenAI text-embedding-3-small (1536 dimensions)
    #[default]
    TextEmbedding3Small,
    /// OpenAI text-embedding-3-large (3072 dimensions)
    TextEmbedding3Large,
    /// OpenAI text-embedding-ada-002 (1536 dimensions)
    TextEmbeddingAda002,
    /// Custom model with specified dimension
    Custom(u32),
}

impl EmbeddingModel {
    pub fn dimension(&self) -> u32 {
        match self {
            EmbeddingModel::TextEmbedding3Small => 1536,
            EmbeddingModel::TextEmbedding3Large => 3072,
            EmbeddingModel::TextEmbeddingAda002 => 1536,
            EmbeddingModel::Custom(dim) => *dim,
        }
    }

    pub fn model_name(&self) -> &str {
        match self {
            EmbeddingModel::TextEmbedding3Small => "text-embedding-3-small",
            EmbeddingModel::TextEmbedding3Large => "text-embedding-3-large",
            EmbeddingModel::TextEmbeddingAda002 => "text-embedding-ada-002",
            EmbeddingModel::Custom(_) => "custom",
        }
    }

    /// Parse a model name as used in configuration.
    ///
    /// Unknown names fall back to the default model.
    pub fn parse(name: &str) -> Self {
        match name {
            "text-embedding-3-small" => EmbeddingModel::TextEmbedding3Small,
            "text-embedding-3-large" => EmbeddingModel::TextEmbedding3Large,
            "text-embedding-ada-002" => EmbeddingModel::TextEmbeddingAda002,
            _ => EmbeddingModel::default(),
        }
    }
}

/// Embedding result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResult {
    pub values: Vec<f32>,
    pub dimension: u32,
    pub tokens_used: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_dimensions() {
        assert_eq!(EmbeddingModel::TextEmbedding3Small.dimension(), 1536);
        assert_eq!(EmbeddingModel::TextEmbedding3Large.dimension(), 3072);
        assert_eq!(EmbeddingModel::Custom(768).dimension(), 768);
    }

    #[test]
    fn test_model_parse_round_trip() {
        for model in [
            EmbeddingModel::TextEmbedding3Small,
            EmbeddingModel::TextEmbedding3Large,
            EmbeddingModel::TextEmbeddingAda002,
        ] {
            assert_eq!(EmbeddingModel::parse(model.model_name()), model);
        }
    }

    #[test]
    fn test_model_parse_unknown_falls_back() {
        assert_eq!(
            EmbeddingModel::parse("some-future-model"),
            EmbeddingModel::TextEmbedding3Small
        );
    }

    #[test]
    fn test_vector_builder() {
        let id = Uuid::new_v4();
        let vector = Vector::new(id, vec![0.1, 0.2]).with_payload(serde_json::json!({"name": "x"}));
        assert_eq!(vector.id, id);
        assert!(vector.payload.is_some());
    }
}
