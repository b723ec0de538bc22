use async_trait::async_trait;

use crate::error::SearchResult;
use crate::models::ChatMessage;

/// Trait for chat-completion providers
///
/// A single invocation of a text-generation model: role-tagged messages in,
/// free text out. No streaming, no retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> SearchResult<String>;
}
