use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Results farther than this cosine distance are not shown to the user.
///
/// A product decision, not a statistical property; do not derive it from
/// data.
pub const RELEVANCE_THRESHOLD: f32 = 0.5;

/// How many candidates the recommendation pipeline pulls from the store.
pub const CHAT_RESULT_LIMIT: u32 = 3;

/// Default candidate count for the plain search listing.
pub const SEARCH_RESULT_LIMIT: u32 = 5;

/// Title shown when a stored product carries no name.
pub const UNKNOWN_PRODUCT_TITLE: &str = "Unknown product";

/// Chat message role
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role-tagged message of a chat prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// A raw candidate match from the vector store.
///
/// `distance` may be absent when the store returned no relevance signal for
/// the point; such entries never survive relevance filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductMatch {
    pub id: Uuid,
    pub title: Option<String>,
    pub distance: Option<f32>,
}

impl From<domain_vector::SearchResult> for ProductMatch {
    fn from(result: domain_vector::SearchResult) -> Self {
        let title = result
            .payload
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .map(|s| s.to_string());

        Self {
            id: result.id,
            title,
            distance: result.distance,
        }
    }
}

/// A match that passed relevance filtering; its distance is guaranteed to be
/// within [`RELEVANCE_THRESHOLD`].
#[derive(Debug, Clone, PartialEq)]
pub struct RelevantProduct {
    pub id: Uuid,
    pub title: Option<String>,
    pub distance: f32,
}

impl RelevantProduct {
    /// Display title, with the fallback applied.
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_PRODUCT_TITLE)
    }

    /// Display-only inversion of the distance; more intuitive for the
    /// language model and for humans reading the prompt.
    pub fn similarity(&self) -> f32 {
        1.0 - self.distance
    }
}

/// Product entry in the public response payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductHit {
    pub id: Uuid,
    pub title: String,
    pub distance: f32,
}

impl From<&RelevantProduct> for ProductHit {
    fn from(product: &RelevantProduct) -> Self {
        Self {
            id: product.id,
            title: product.title_or_default().to_string(),
            distance: product.distance,
        }
    }
}

/// The response envelope, the sole contract surfaced to callers.
///
/// Every pipeline outcome collapses into this shape: validation failures,
/// collaborator faults, the no-results case and full success.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub success: bool,
    /// The echoed query; null only on pre-validation failure
    pub query: Option<String>,
    /// Error or status text, null on success
    pub message: Option<String>,
    /// Recommendation text (or the no-results message), null on failure
    pub response: Option<String>,
    /// Relevant products, possibly empty
    pub products: Vec<ProductHit>,
}

impl SearchResponse {
    pub fn failure(query: Option<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            query,
            message: Some(message.into()),
            response: None,
            products: vec![],
        }
    }

    pub fn no_results(query: String, message_text: String) -> Self {
        Self {
            success: true,
            query: Some(query),
            message: None,
            response: Some(message_text),
            products: vec![],
        }
    }

    pub fn recommendation(
        query: String,
        text: String,
        products: &[RelevantProduct],
    ) -> Self {
        Self {
            success: true,
            query: Some(query),
            message: None,
            response: Some(text),
            products: products.iter().map(ProductHit::from).collect(),
        }
    }

    pub fn listing(query: String, products: &[RelevantProduct]) -> Self {
        Self {
            success: true,
            query: Some(query),
            message: None,
            response: None,
            products: products.iter().map(ProductHit::from).collect(),
        }
    }
}
