pub mod config;
pub mod error;
pub mod logger;
pub mod record;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::RabbitRagError;
pub use record::{load_records, save_records, Record};
pub type Result<T> = std::result::Result<T, RabbitRagError>;
