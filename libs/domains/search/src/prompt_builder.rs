//! Construction of the recommendation chat prompt.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::error::SearchResult;
use crate::models::{ChatMessage, RelevantProduct};
use crate::prompts::{
    NO_RESULTS_MESSAGE_KEY, PROMPT_SECTION, PromptStore, SYSTEM_PROMPT_KEY,
    USER_MESSAGE_TEMPLATE_KEY,
};

/// Turns the query and the filtered matches into a system/user message pair
/// steering the completion model toward the product-recommendation persona.
///
/// The persona text lives in the prompt store, not here; swapping it requires
/// no code change. Output is deterministic for identical inputs and template
/// content.
pub struct RecommendationPromptBuilder {
    prompts: Arc<dyn PromptStore>,
}

impl RecommendationPromptBuilder {
    pub fn new(prompts: Arc<dyn PromptStore>) -> Self {
        Self { prompts }
    }

    /// Build the two-message prompt for the given query and filtered results.
    pub fn build(
        &self,
        query: &str,
        products: &[RelevantProduct],
    ) -> SearchResult<Vec<ChatMessage>> {
        let system = self
            .prompts
            .get(PROMPT_SECTION, SYSTEM_PROMPT_KEY, &HashMap::new())?;

        let params = HashMap::from([
            ("query".to_string(), query.to_string()),
            (
                "products_list".to_string(),
                Self::format_products_list(products),
            ),
        ]);
        let user = self
            .prompts
            .get(PROMPT_SECTION, USER_MESSAGE_TEMPLATE_KEY, &params)?;

        Ok(vec![ChatMessage::system(system), ChatMessage::user(user)])
    }

    /// The configurable message shown when nothing (relevant) was found.
    pub fn no_results_message(&self) -> SearchResult<String> {
        self.prompts
            .get(PROMPT_SECTION, NO_RESULTS_MESSAGE_KEY, &HashMap::new())
    }

    /// One line per product, 1-indexed, reporting similarity rather than
    /// distance.
    fn format_products_list(products: &[RelevantProduct]) -> String {
        let mut list = String::new();
        for (index, product) in products.iter().enumerate() {
            let _ = writeln!(
                list,
                "{}. {} (Similarity: {})",
                index + 1,
                product.title_or_default(),
                product.similarity()
            );
        }
        list
    }
}
