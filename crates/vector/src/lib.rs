//! rabbitrag Vector Search
//!
//! In-memory store of (chunk, embedding) pairs ranked by cosine similarity

mod chunk;
mod retriever;
mod similarity;
mod store;
mod types;

pub use chunk::record_to_chunk;
pub use retriever::Retriever;
pub use similarity::cosine_similarity;
pub use store::{PopulatePolicy, PopulateReport, VectorStore};
pub use types::{ScoredResult, VectorStoreEntry};
