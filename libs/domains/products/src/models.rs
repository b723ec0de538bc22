use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Product record as imported from a catalog.
///
/// Products have no store of record of their own: once imported they live as
/// payloads on their vectors in the vector collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier
    pub id: u64,
    /// Product name
    pub name: String,
    /// Product description
    #[serde(default)]
    pub description: String,
    /// Price in cents
    pub price_cents: i64,
    /// Product category
    pub category: Option<String>,
    /// Brand name
    pub brand: Option<String>,
    /// Tags for search and organization
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    /// Stable vector-store point id derived from the catalog id.
    pub fn point_id(&self) -> Uuid {
        Uuid::from_u128(self.id as u128)
    }

    /// The text handed to the embedding provider.
    ///
    /// Name and description carry the semantic weight; category, brand and
    /// tags are appended so they influence similarity too.
    pub fn embedding_text(&self) -> String {
        let mut text = self.name.clone();

        if !self.description.trim().is_empty() {
            text.push_str(". ");
            text.push_str(self.description.trim());
        }
        if let Some(category) = &self.category {
            text.push_str(". Category: ");
            text.push_str(category);
        }
        if let Some(brand) = &self.brand {
            text.push_str(". Brand: ");
            text.push_str(brand);
        }
        if !self.tags.is_empty() {
            text.push_str(". Tags: ");
            text.push_str(&self.tags.join(", "));
        }

        text
    }

    /// The JSON payload stored alongside the product's vector.
    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!({
            "product_id": self.id,
            "name": self.name,
            "description": self.description,
            "price_cents": self.price_cents,
            "category": self.category,
            "brand": self.brand,
            "tags": self.tags,
        })
    }
}

/// Result of a catalog import run
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    /// Products found in the catalog
    pub total: usize,
    /// Products embedded and upserted
    pub imported: usize,
    /// Products rejected by validation
    pub skipped: usize,
}
