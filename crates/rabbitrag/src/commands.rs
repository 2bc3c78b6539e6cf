use anyhow::{Context, Result};
use rabbitrag_common::{load_records, save_records, AppConfig};
use rabbitrag_ingest::{ListingScraper, ScrapeOptions};
use rabbitrag_llm::{ChatProvider, OllamaClient};
use rabbitrag_vector::{PopulatePolicy, VectorStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::chat::ChatSession;

/// Scrape the listing and write the record file
pub async fn run_scrape(config: &AppConfig) -> Result<()> {
    let scraper = ListingScraper::new(ScrapeOptions::from_config(config))?;
    let records = scraper.run().await?;

    save_records(&config.records_path, &records)
        .with_context(|| format!("Failed to write {}", config.records_path.display()))?;

    println!(
        "Saved {} records to {}",
        records.len(),
        config.records_path.display()
    );
    if !records.is_empty() {
        println!("\nSample data:");
        for record in records.iter().take(3) {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
    }

    Ok(())
}

/// Load and embed the record file, then answer questions from stdin
pub async fn run_chat(config: &AppConfig) -> Result<()> {
    let records = load_records(&config.records_path)
        .with_context(|| format!("Failed to load {}", config.records_path.display()))?;
    println!("Loaded {} entries", records.len());

    let client = Arc::new(
        OllamaClient::new(
            config.ollama_base_url.as_str(),
            Duration::from_secs(config.request_timeout_secs),
        )?
        .with_max_retries(config.max_retries),
    );

    match client.test_connection().await {
        Ok(true) => info!("Ollama reachable at {}", client.base_url()),
        Ok(false) => warn!("Ollama at {} answered with an error status", client.base_url()),
        Err(e) => warn!("Ollama connection check failed: {}", e),
    }

    let policy = if config.skip_failed_records {
        PopulatePolicy::Skip
    } else {
        PopulatePolicy::Abort
    };

    let mut store = VectorStore::new(client.clone(), config.embedding_model.as_str());
    let report = store
        .populate(&records, policy)
        .await
        .context("Failed to build the vector store")?;
    if report.skipped > 0 {
        warn!("{} records could not be embedded and were skipped", report.skipped);
    }
    println!("Embedded {} chunks", report.added);

    let chat: Arc<dyn ChatProvider> = client;
    let session = ChatSession::new(&store, chat, config.llm_model.as_str(), config.top_n);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    session.run(stdin, &mut stdout).await?;

    Ok(())
}
