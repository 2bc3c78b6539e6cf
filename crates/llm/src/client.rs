use async_trait::async_trait;
use rabbitrag_common::{RabbitRagError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::llm_trait::{ChatProvider, EmbeddingProvider};
use crate::stream::{decode_chat_stream, FragmentStream};
use crate::types::{ChatMessage, ChatRequest, EmbedRequest, EmbedResponse};

/// Ollama API client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    client: Client,
    max_retries: u32,
}

impl OllamaClient {
    /// Create new Ollama client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("Ollama client initialized: {}", base_url);
        Ok(Self {
            base_url,
            client,
            max_retries: 3,
        })
    }

    /// Number of attempts per embedding request (at least one)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate embedding for text (with retry logic)
    pub async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embed", self.base_url);

        debug!("Generating embedding - Model: {}, Text length: {}", model, text.len());

        let request = EmbedRequest {
            model: model.to_string(),
            input: text.to_string(),
        };

        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.try_embed(&url, &request).await {
                Ok(embedding) => {
                    debug!("Received embedding - Dimension: {}", embedding.len());
                    return Ok(embedding);
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt - 1));
                        tracing::warn!(
                            "Embedding request failed (attempt {}/{}): {}. Retrying in {:?}...",
                            attempt,
                            self.max_retries,
                            e,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| RabbitRagError::embedding("All retries failed")))
    }

    /// Single attempt to generate embedding
    async fn try_embed(&self, url: &str, request: &EmbedRequest) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| RabbitRagError::network(format!("Failed to send embedding request: {}", e)))?
            .error_for_status()
            .map_err(|e| RabbitRagError::embedding(format!("Ollama embedding API error: {}", e)))?;

        let result: EmbedResponse = response.json().await.map_err(|e| {
            RabbitRagError::embedding(format!("Failed to parse embedding response: {}", e))
        })?;

        match result.embeddings.into_iter().next() {
            Some(embedding) if !embedding.is_empty() => Ok(embedding),
            _ => Err(RabbitRagError::EmptyEmbedding),
        }
    }

    /// Stream a chat completion. Not retried: fragments may already be shown
    pub async fn chat_stream(&self, model: &str, messages: Vec<ChatMessage>) -> Result<FragmentStream> {
        let url = format!("{}/api/chat", self.base_url);

        debug!(
            "Sending chat request to Ollama - Model: {}, Messages: {}",
            model,
            messages.len()
        );

        let request = ChatRequest {
            model: model.to_string(),
            messages,
            stream: true,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RabbitRagError::network(format!("Failed to send chat request: {}", e)))?
            .error_for_status()
            .map_err(|e| RabbitRagError::chat(format!("Ollama chat API error: {}", e)))?;

        Ok(decode_chat_stream(response.bytes_stream()))
    }

    /// Test connection to Ollama
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RabbitRagError::network(format!("Failed to connect to Ollama: {}", e)))?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>> {
        OllamaClient::embed(self, model, text).await
    }
}

#[async_trait]
impl ChatProvider for OllamaClient {
    async fn chat_stream(&self, model: &str, messages: Vec<ChatMessage>) -> Result<FragmentStream> {
        OllamaClient::chat_stream(self, model, messages).await
    }

    async fn test_connection(&self) -> Result<bool> {
        OllamaClient::test_connection(self).await
    }
}
