use async_trait::async_trait;
use rabbitrag_common::Result;

use crate::stream::FragmentStream;
use crate::types::ChatMessage;

/// Source of text embeddings
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding for text
    async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>>;
}

/// Streaming chat completion backend
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Start a chat completion; the reply arrives as incremental fragments
    async fn chat_stream(&self, model: &str, messages: Vec<ChatMessage>) -> Result<FragmentStream>;

    /// Test connection/availability
    async fn test_connection(&self) -> Result<bool>;
}
