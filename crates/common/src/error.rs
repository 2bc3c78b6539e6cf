/// rabbitrag error types
#[derive(Debug, thiserror::Error)]
pub enum RabbitRagError {
    /// Embedding provider returned an error or an unusable response
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Embedding provider returned an empty vector
    #[error("Embedding provider returned an empty embedding")]
    EmptyEmbedding,

    /// Chat provider error
    #[error("Chat error: {0}")]
    Chat(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Embedding length differs from the store dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Malformed record data
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Scraping/ingestion error
    #[error("Scrape error: {0}")]
    Scrape(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RabbitRagError {
    /// Create embedding error
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        Self::Embedding(msg.into())
    }

    /// Create chat error
    pub fn chat<S: Into<String>>(msg: S) -> Self {
        Self::Chat(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create invalid record error
    pub fn invalid_record<S: Into<String>>(msg: S) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create scrape error
    pub fn scrape<S: Into<String>>(msg: S) -> Self {
        Self::Scrape(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

// Classification used by callers deciding whether to retry, skip or abort
impl RabbitRagError {
    /// Failure of an external embedding/chat service
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::Embedding(_) | Self::EmptyEmbedding | Self::Chat(_) | Self::Network(_)
        )
    }

    /// Data shape failure (bad vectors or records)
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. } | Self::InvalidRecord(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_classification() {
        assert!(RabbitRagError::embedding("boom").is_provider_error());
        assert!(RabbitRagError::EmptyEmbedding.is_provider_error());
        assert!(RabbitRagError::network("down").is_provider_error());
        assert!(!RabbitRagError::dimension_mismatch(3, 2).is_provider_error());
    }

    #[test]
    fn test_data_classification() {
        assert!(RabbitRagError::dimension_mismatch(768, 384).is_data_error());
        assert!(RabbitRagError::invalid_record("no name").is_data_error());
        assert!(!RabbitRagError::chat("oops").is_data_error());
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = RabbitRagError::dimension_mismatch(768, 384);
        assert_eq!(err.to_string(), "Dimension mismatch: expected 768, got 384");
    }
}
