use rabbitrag_common::{RabbitRagError, Result};
use tracing::debug;

use crate::similarity::cosine_similarity;
use crate::store::VectorStore;
use crate::types::ScoredResult;

/// Top-N similarity search over a borrowed store
pub struct Retriever<'a> {
    store: &'a VectorStore,
}

impl<'a> Retriever<'a> {
    pub fn new(store: &'a VectorStore) -> Self {
        Self { store }
    }

    /// Embed `query` and return the `top_n` most similar chunks, best first
    pub async fn retrieve(&self, query: &str, top_n: usize) -> Result<Vec<ScoredResult>> {
        debug!("Searching for: {} (top_n={})", query, top_n);

        if query.trim().is_empty() {
            return Err(RabbitRagError::invalid_input("query must not be blank"));
        }

        if self.store.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.store.embed(query).await?;
        let results = self.rank(&query_embedding, top_n)?;

        debug!(
            "Search completed - {} results from {} candidates",
            results.len(),
            self.store.len()
        );
        Ok(results)
    }

    /// Score every entry against an embedded query and keep the best `top_n`.
    ///
    /// Ties keep store order. A query whose length differs from the store
    /// dimension is a `DimensionMismatch` against that dimension.
    pub fn rank(&self, query_embedding: &[f32], top_n: usize) -> Result<Vec<ScoredResult>> {
        if let Some(expected) = self.store.dimension() {
            if query_embedding.len() != expected {
                return Err(RabbitRagError::dimension_mismatch(expected, query_embedding.len()));
            }
        }

        let mut results = self
            .store
            .entries()
            .iter()
            .map(|entry| {
                cosine_similarity(query_embedding, &entry.embedding)
                    .map(|score| ScoredResult::new(entry.chunk.clone(), score))
            })
            .collect::<Result<Vec<_>>>()?;

        // sort_by is stable
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_n);

        Ok(results)
    }
}
