use crate::error::RabbitRagError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_EMBEDDING_MODEL: &str = "hf.co/CompendiumLabs/bge-base-en-v1.5-gguf";
const DEFAULT_LLM_MODEL: &str = "hf.co/bartowski/Llama-3.2-1B-Instruct-GGUF";
const DEFAULT_LISTING_URL: &str = "https://toolkit.rescuegroups.org/iframe/fb/v3.0/";

/// rabbitrag application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ollama API base URL
    pub ollama_base_url: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Chat model name
    pub llm_model: String,

    /// Record file written by `scrape` and read by `chat`
    pub records_path: PathBuf,

    /// Number of chunks retrieved per question
    pub top_n: usize,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    /// Embedding request attempts before giving up
    pub max_retries: u32,

    /// Skip records whose embedding fails instead of aborting the load
    pub skip_failed_records: bool,

    /// Adoption listing iframe base URL
    pub listing_base_url: String,

    /// Organization id filter for the listing
    pub listing_org_id: String,

    /// Species filter for the listing
    pub species: String,

    /// Number of listing pages to visit
    pub total_pages: u32,

    /// Pause between detail page requests in milliseconds
    pub request_delay_ms: u64,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ollama_base_url: DEFAULT_OLLAMA_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            records_path: PathBuf::from("rabbits.json"),
            top_n: 3,
            request_timeout_secs: 300,
            max_retries: 3,
            skip_failed_records: false,
            listing_base_url: DEFAULT_LISTING_URL.to_string(),
            listing_org_id: "925".to_string(),
            species: "Rabbit".to_string(),
            total_pages: 6,
            request_delay_ms: 500,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, RabbitRagError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();
        let config = Self {
            ollama_base_url: Self::get_env_string("OLLAMA_BASE_URL")
                .unwrap_or(defaults.ollama_base_url),
            embedding_model: Self::get_env_string("EMBEDDING_MODEL")
                .unwrap_or(defaults.embedding_model),
            llm_model: Self::get_env_string("LLM_MODEL").unwrap_or(defaults.llm_model),
            records_path: Self::get_env_path("RECORDS_PATH").unwrap_or(defaults.records_path),
            top_n: Self::get_env_parsed("TOP_N")?.unwrap_or(defaults.top_n),
            request_timeout_secs: Self::get_env_parsed("REQUEST_TIMEOUT_SECS")?
                .unwrap_or(defaults.request_timeout_secs),
            max_retries: Self::get_env_parsed("MAX_RETRIES")?.unwrap_or(defaults.max_retries),
            skip_failed_records: Self::get_env_parsed("SKIP_FAILED_RECORDS")?
                .unwrap_or(defaults.skip_failed_records),
            listing_base_url: Self::get_env_string("LISTING_BASE_URL")
                .unwrap_or(defaults.listing_base_url),
            listing_org_id: Self::get_env_string("LISTING_ORG_ID")
                .unwrap_or(defaults.listing_org_id),
            species: Self::get_env_string("SPECIES").unwrap_or(defaults.species),
            total_pages: Self::get_env_parsed("TOTAL_PAGES")?.unwrap_or(defaults.total_pages),
            request_delay_ms: Self::get_env_parsed("REQUEST_DELAY_MS")?
                .unwrap_or(defaults.request_delay_ms),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: Self::get_env_string("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;

        Ok(config)
    }

    fn get_env_string(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        Self::get_env_string(key).map(PathBuf::from)
    }

    /// Parse an environment variable, failing on malformed values
    fn get_env_parsed<T>(key: &str) -> Result<Option<T>, RabbitRagError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match Self::get_env_string(key) {
            Some(raw) => raw.trim().parse().map(Some).map_err(|e| {
                RabbitRagError::config(format!("Invalid value for {}: '{}' ({})", key, raw, e))
            }),
            None => Ok(None),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), RabbitRagError> {
        for (name, url) in [
            ("Ollama base URL", &self.ollama_base_url),
            ("Listing base URL", &self.listing_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(RabbitRagError::config(format!(
                    "{} must start with http:// or https://",
                    name
                )));
            }
        }

        if self.embedding_model.is_empty() {
            return Err(RabbitRagError::config("Embedding model name cannot be empty"));
        }

        if self.llm_model.is_empty() {
            return Err(RabbitRagError::config("Chat model name cannot be empty"));
        }

        if self.total_pages == 0 {
            return Err(RabbitRagError::config("Total pages must be at least 1"));
        }

        if self.max_retries == 0 {
            return Err(RabbitRagError::config("Max retries must be at least 1"));
        }

        Ok(())
    }
}
