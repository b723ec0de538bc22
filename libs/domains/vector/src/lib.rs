//! Vector Domain Library
//!
//! Domain implementation for vector storage and search, wrapping Qdrant with
//! embedding generation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  VectorService  │  ← High-level operations, embedding integration
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐     ┌──────────────────┐
//! │ VectorRepository│     │ EmbeddingProvider│
//! │   (trait)       │     │    (trait)       │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//! ┌────────▼────────┐     ┌────────▼─────────┐
//! │ QdrantRepository│     │  OpenAIProvider  │
//! │ (implementation)│     │ (implementation) │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! Search results use the cosine-distance convention throughout: 0 means
//! identical, larger means less similar. Qdrant's similarity scores are
//! converted inside `QdrantRepository`.

pub mod embedding;
pub mod error;
pub mod models;
pub mod qdrant;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use embedding::{EmbeddingProvider, OpenAIConfig, OpenAIProvider};
pub use error::{VectorError, VectorResult};
pub use models::{
    CollectionInfo, DistanceMetric, EmbeddingModel, EmbeddingProviderType, EmbeddingResult,
    SearchQuery, SearchResult, Vector, VectorConfig,
};
pub use qdrant::{QdrantConfig, QdrantRepository};
pub use repository::VectorRepository;
pub use service::{IndexDocument, VectorService};
