//! rabbitrag LLM Integration
//!
//! Ollama API client for embeddings and streaming chat, plus the grounding prompt

mod client;
mod llm_trait;
mod prompts;
mod stream;
mod types;

pub use client::OllamaClient;
pub use llm_trait::{ChatProvider, EmbeddingProvider};
pub use prompts::{grounded_messages, instruction_prompt, INSTRUCTION_HEADER};
pub use stream::{decode_chat_stream, FragmentStream};
pub use types::{ChatMessage, ChatRequest, ChatResponse, ChatRole, EmbedRequest, EmbedResponse};
