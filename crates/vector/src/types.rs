/// Vector store entry
#[derive(Debug, Clone, PartialEq)]
pub struct VectorStoreEntry {
    /// Chunk text
    pub chunk: String,

    /// Embedding of the chunk
    pub embedding: Vec<f32>,
}

/// Search result
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    /// Chunk text
    pub chunk: String,

    /// Cosine similarity (-1.0 to 1.0)
    pub score: f32,
}

impl ScoredResult {
    pub fn new(chunk: String, score: f32) -> Self {
        Self { chunk, score }
    }
}
