use rabbitrag_common::{RabbitRagError, Record, Result};
use rabbitrag_llm::EmbeddingProvider;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::chunk::record_to_chunk;
use crate::types::VectorStoreEntry;

/// What `populate` does when a record cannot be embedded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopulatePolicy {
    /// Stop at the first failure and return its error
    #[default]
    Abort,
    /// Log the failure and continue with the next record
    Skip,
}

/// Outcome of a bulk load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopulateReport {
    pub added: usize,
    pub skipped: usize,
}

/// Append-only, in-memory vector store.
///
/// Entries keep insertion order and all share the dimension of the first
/// entry. Entries are appended only after a successful embedding call.
pub struct VectorStore {
    entries: Vec<VectorStoreEntry>,
    embedder: Arc<dyn EmbeddingProvider>,
    embedding_model: String,
}

impl VectorStore {
    /// Create empty store bound to an embedding provider and model
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, embedding_model: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            embedder,
            embedding_model: embedding_model.into(),
        }
    }

    /// Embed `chunk` and append it to the store
    pub async fn add(&mut self, chunk: impl Into<String>) -> Result<()> {
        let chunk = chunk.into();
        let embedding = self.embed(&chunk).await?;

        if let Some(expected) = self.dimension() {
            if embedding.len() != expected {
                return Err(RabbitRagError::dimension_mismatch(expected, embedding.len()));
            }
        }

        debug!("Adding chunk to vector store - Dimension: {}", embedding.len());
        self.entries.push(VectorStoreEntry { chunk, embedding });
        Ok(())
    }

    /// Chunk and add every record, in order
    pub async fn populate(&mut self, records: &[Record], policy: PopulatePolicy) -> Result<PopulateReport> {
        let total = records.len();
        let mut report = PopulateReport::default();

        for (i, record) in records.iter().enumerate() {
            match self.add(record_to_chunk(record)).await {
                Ok(()) => {
                    report.added += 1;
                    info!("Added chunk {}/{} to the database", i + 1, total);
                }
                Err(e) if policy == PopulatePolicy::Skip && is_record_failure(&e) => {
                    report.skipped += 1;
                    warn!(
                        "Skipping record {}/{} ({}): {}",
                        i + 1,
                        total,
                        record.detail_url,
                        e
                    );
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Vector store populated - {} added, {} skipped",
            report.added, report.skipped
        );
        Ok(report)
    }

    /// Embed text with the store's model, rejecting empty or non-finite vectors
    pub(crate) async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.embedder.embed(&self.embedding_model, text).await?;
        if embedding.is_empty() {
            return Err(RabbitRagError::EmptyEmbedding);
        }
        if !embedding.iter().all(|x| x.is_finite()) {
            return Err(RabbitRagError::embedding("non-finite value in embedding"));
        }
        Ok(embedding)
    }

    pub fn entries(&self) -> &[VectorStoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embedding dimension, fixed by the first entry
    pub fn dimension(&self) -> Option<usize> {
        self.entries.first().map(|e| e.embedding.len())
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }
}

/// Failures confined to a single record, which `Skip` may step over
fn is_record_failure(e: &RabbitRagError) -> bool {
    e.is_provider_error() || e.is_data_error()
}
