use serde::{Deserialize, Serialize};

/// Ollama embed request (`/api/embed`)
#[derive(Debug, Clone, Serialize)]
pub struct EmbedRequest {
    /// Embedding model name
    pub model: String,

    /// Text to embed
    pub input: String,
}

/// Ollama embed response
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedResponse {
    /// One embedding per input
    #[serde(default)]
    pub embeddings: Vec<Vec<f32>>,
}

/// Chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

/// Ollama chat request (`/api/chat`)
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model name (e.g., "llama3.2")
    pub model: String,

    /// Conversation, oldest first
    pub messages: Vec<ChatMessage>,

    /// Stream NDJSON fragments
    pub stream: bool,
}

/// One NDJSON line of a streamed chat response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Incremental assistant message
    #[serde(default)]
    pub message: Option<ChatMessage>,

    /// Whether generation is complete
    #[serde(default)]
    pub done: bool,

    /// Error reported mid-stream
    #[serde(default)]
    pub error: Option<String>,
}
