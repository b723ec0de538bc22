//! Prompt template storage.
//!
//! Templates are addressed by `(section, key)` and rendered with named
//! parameters. Built-in templates ship with the crate; a directory of
//! `<section>.<key>.hbs` files can override them at startup so the persona
//! can be swapped without code changes.

use std::collections::HashMap;
use std::path::Path;

use handlebars::Handlebars;
use tracing::info;

use crate::error::{SearchError, SearchResult};

/// Template section for the product finder persona
pub const PROMPT_SECTION: &str = "product_finder";
/// Key of the system/persona prompt
pub const SYSTEM_PROMPT_KEY: &str = "system_prompt";
/// Key of the user message template (`query`, `products_list` params)
pub const USER_MESSAGE_TEMPLATE_KEY: &str = "user_message_template";
/// Key of the friendly no-results message
pub const NO_RESULTS_MESSAGE_KEY: &str = "no_results_message";

/// Read access to prompt templates.
#[cfg_attr(test, mockall::automock)]
pub trait PromptStore: Send + Sync {
    /// Render the template at `(section, key)` with the given parameters.
    ///
    /// Fails with [`SearchError::Template`] when the key is absent or a
    /// referenced parameter is missing.
    fn get(
        &self,
        section: &str,
        key: &str,
        params: &HashMap<String, String>,
    ) -> SearchResult<String>;
}

/// Handlebars-backed template store, built once at startup.
pub struct HandlebarsPromptStore {
    handlebars: Handlebars<'static>,
}

impl HandlebarsPromptStore {
    /// Create a store with the built-in templates registered.
    pub fn new() -> SearchResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        // Prompts are plain text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        for (key, template) in [
            (SYSTEM_PROMPT_KEY, SYSTEM_PROMPT),
            (USER_MESSAGE_TEMPLATE_KEY, USER_MESSAGE_TEMPLATE),
            (NO_RESULTS_MESSAGE_KEY, NO_RESULTS_MESSAGE),
        ] {
            let name = template_name(PROMPT_SECTION, key);
            handlebars
                .register_template_string(&name, template)
                .map_err(|e| {
                    SearchError::Template(format!("Failed to register {}: {}", name, e))
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Create a store and apply overrides from `PROMPT_TEMPLATE_DIR`, if set.
    pub fn from_env() -> SearchResult<Self> {
        let store = Self::new()?;
        match std::env::var("PROMPT_TEMPLATE_DIR") {
            Ok(dir) => store.with_overrides_dir(dir),
            Err(_) => Ok(store),
        }
    }

    /// Load `<section>.<key>.hbs` files from a directory, overriding the
    /// registered templates.
    pub fn with_overrides_dir(mut self, dir: impl AsRef<Path>) -> SearchResult<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            SearchError::Template(format!(
                "Cannot read prompt template dir {}: {}",
                dir.display(),
                e
            ))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| SearchError::Template(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("hbs") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            self.handlebars
                .register_template_file(name, &path)
                .map_err(|e| {
                    SearchError::Template(format!("Invalid template {}: {}", path.display(), e))
                })?;
            info!(template = name, "Loaded prompt template override");
        }

        Ok(self)
    }
}

impl PromptStore for HandlebarsPromptStore {
    fn get(
        &self,
        section: &str,
        key: &str,
        params: &HashMap<String, String>,
    ) -> SearchResult<String> {
        let name = template_name(section, key);
        if !self.handlebars.has_template(&name) {
            return Err(SearchError::Template(format!(
                "Unknown prompt template: {}",
                name
            )));
        }

        self.handlebars
            .render(&name, params)
            .map_err(|e| SearchError::Template(e.to_string()))
    }
}

fn template_name(section: &str, key: &str) -> String {
    format!("{}.{}", section, key)
}

const SYSTEM_PROMPT: &str = "\
You are a product recommendation assistant for an online store. You receive \
a customer's search query together with a short list of matching products \
and their similarity scores. Recommend the most suitable of the listed \
products in a friendly, concise tone, and mention why each one fits the \
query. Only talk about the listed products; never invent products that are \
not in the list.";

const USER_MESSAGE_TEMPLATE: &str = "\
Customer query: {{query}}

Matching products:
{{products_list}}
Based on these matches, recommend the best options for the customer.";

const NO_RESULTS_MESSAGE: &str = "\
Sorry, I could not find any matching products. Try describing what you are \
looking for in different words.";

#[cfg(test)]
mod tests {
    use super::*;

    fn no_params() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn test_builtin_templates_are_registered() {
        let store = HandlebarsPromptStore::new().unwrap();

        let no_results = store
            .get(PROMPT_SECTION, NO_RESULTS_MESSAGE_KEY, &no_params())
            .unwrap();
        assert!(no_results.contains("could not find"));

        let system = store
            .get(PROMPT_SECTION, SYSTEM_PROMPT_KEY, &no_params())
            .unwrap();
        assert!(system.contains("recommendation assistant"));
    }

    #[test]
    fn test_unknown_key_is_a_template_error() {
        let store = HandlebarsPromptStore::new().unwrap();
        let err = store
            .get(PROMPT_SECTION, "nope", &no_params())
            .unwrap_err();
        assert!(matches!(err, SearchError::Template(_)));
    }

    #[test]
    fn test_user_template_substitutes_params() {
        let store = HandlebarsPromptStore::new().unwrap();
        let params = HashMap::from([
            ("query".to_string(), "waterproof phone".to_string()),
            (
                "products_list".to_string(),
                "1. Phone X (Similarity: 0.8)\n".to_string(),
            ),
        ]);

        let rendered = store
            .get(PROMPT_SECTION, USER_MESSAGE_TEMPLATE_KEY, &params)
            .unwrap();
        assert!(rendered.contains("Customer query: waterproof phone"));
        assert!(rendered.contains("1. Phone X (Similarity: 0.8)"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let store = HandlebarsPromptStore::new().unwrap();
        let params = HashMap::from([
            ("query".to_string(), "lamp".to_string()),
            ("products_list".to_string(), "1. Lamp (Similarity: 0.9)\n".to_string()),
        ]);

        let first = store
            .get(PROMPT_SECTION, USER_MESSAGE_TEMPLATE_KEY, &params)
            .unwrap();
        let second = store
            .get(PROMPT_SECTION, USER_MESSAGE_TEMPLATE_KEY, &params)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_query_text_is_not_html_escaped() {
        let store = HandlebarsPromptStore::new().unwrap();
        let params = HashMap::from([
            ("query".to_string(), "kettle & \"teapot\"".to_string()),
            ("products_list".to_string(), String::new()),
        ]);

        let rendered = store
            .get(PROMPT_SECTION, USER_MESSAGE_TEMPLATE_KEY, &params)
            .unwrap();
        assert!(rendered.contains("kettle & \"teapot\""));
    }

    #[test]
    fn test_overrides_dir_replaces_builtin() {
        let dir = std::env::temp_dir().join(format!("prompts-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("product_finder.no_results_message.hbs"),
            "Nothing found, sorry!",
        )
        .unwrap();

        let store = HandlebarsPromptStore::new()
            .unwrap()
            .with_overrides_dir(&dir)
            .unwrap();
        let message = store
            .get(PROMPT_SECTION, NO_RESULTS_MESSAGE_KEY, &no_params())
            .unwrap();
        assert_eq!(message, "Nothing found, sorry!");

        std::fs::remove_dir_all(&dir).ok();
    }
}
