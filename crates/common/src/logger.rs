use crate::error::RabbitRagError;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_NAME: &str = "rabbitrag.log";

/// Log to stderr and to `<log_dir>/rabbitrag.log`.
///
/// stdout is left to the interactive chat surface. `RUST_LOG` overrides
/// `log_level` when set.
pub fn setup_logging(log_dir: &Path, log_level: &str) -> Result<(), RabbitRagError> {
    let (log_file, log_file_path) = open_log_file(log_dir)?;
    let filter = env_filter(log_level);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter.clone());

    let file_layer = fmt::layer()
        .with_writer(log_file)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: level={}, log_file={}", log_level, log_file_path.display());

    Ok(())
}

/// stderr-only logging for the one-shot `scrape` command
pub fn setup_console_logging(log_level: &str) -> Result<(), RabbitRagError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(env_filter(log_level))
        .init();

    Ok(())
}

/// Create `log_dir` if needed and open the log file for appending
fn open_log_file(log_dir: &Path) -> Result<(File, PathBuf), RabbitRagError> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        RabbitRagError::config(format!(
            "Failed to create log directory {}: {}",
            log_dir.display(),
            e
        ))
    })?;

    let path = log_dir.join(LOG_FILE_NAME);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| {
            RabbitRagError::config(format!("Failed to open log file {}: {}", path.display(), e))
        })?;

    Ok((file, path))
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_directive(log_level)))
}

/// Normalized filter directive for a configured level name
fn level_directive(log_level: &str) -> String {
    parse_log_level(log_level).to_string().to_lowercase()
}

/// Parse a level name, falling back to INFO
pub fn parse_log_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to INFO", level);
            Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("trace"), Level::TRACE);
        assert_eq!(parse_log_level("debug"), Level::DEBUG);
        assert_eq!(parse_log_level("info"), Level::INFO);
        assert_eq!(parse_log_level("warn"), Level::WARN);
        assert_eq!(parse_log_level("error"), Level::ERROR);
        assert_eq!(parse_log_level("invalid"), Level::INFO);
    }

    #[test]
    fn test_parse_log_level_case_insensitive() {
        assert_eq!(parse_log_level("INFO"), Level::INFO);
        assert_eq!(parse_log_level("Debug"), Level::DEBUG);
        assert_eq!(parse_log_level("WARNING"), Level::WARN);
    }

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("bogus"), "info");
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("log");

        let (_, path) = open_log_file(&log_dir).unwrap();

        assert_eq!(path, log_dir.join("rabbitrag.log"));
        assert!(path.exists());
    }
}
