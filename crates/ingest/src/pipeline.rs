use indicatif::{ProgressBar, ProgressStyle};
use rabbitrag_common::{AppConfig, RabbitRagError, Record, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::parse::{extract_detail_links, extract_record, listing_url};

/// Where and how politely to scrape
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Listing iframe base URL
    pub base_url: String,

    /// Organization id filter
    pub org_id: String,

    /// Species filter
    pub species: String,

    /// Pages `1..=total_pages` are visited
    pub total_pages: u32,

    /// Pause after each detail page
    pub request_delay: Duration,

    /// HTTP request timeout
    pub timeout: Duration,
}

impl ScrapeOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.listing_base_url.clone(),
            org_id: config.listing_org_id.clone(),
            species: config.species.clone(),
            total_pages: config.total_pages,
            request_delay: Duration::from_millis(config.request_delay_ms),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// Sequential listing → detail page scraper
pub struct ListingScraper {
    client: Client,
    options: ScrapeOptions,
}

impl ListingScraper {
    pub fn new(options: ScrapeOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, options })
    }

    /// Scrape every listing page and every linked detail page, in order
    pub async fn run(&self) -> Result<Vec<Record>> {
        let links = self.collect_detail_links().await?;

        let progress = ProgressBar::new(links.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .map_err(|e| anyhow::anyhow!("Invalid progress template: {}", e))?
                .progress_chars("#>-"),
        );

        let mut records = Vec::with_capacity(links.len());
        for (i, link) in links.iter().enumerate() {
            debug!("Scraping detail {}/{}: {}", i + 1, links.len(), link);
            let record = self.scrape_detail(link).await?;
            progress.set_message(record.name.clone());
            progress.inc(1);
            records.push(record);

            if !self.options.request_delay.is_zero() {
                tokio::time::sleep(self.options.request_delay).await;
            }
        }
        progress.finish_with_message("done");

        info!("Scraped {} records", records.len());
        Ok(records)
    }

    /// Detail links from every listing page
    pub async fn collect_detail_links(&self) -> Result<Vec<String>> {
        let mut links = Vec::new();

        for page in 1..=self.options.total_pages {
            let url = listing_url(
                &self.options.base_url,
                page,
                &self.options.org_id,
                &self.options.species,
            );
            info!("Collecting links from page {}: {}", page, url);

            let html = self.fetch_html(&url).await?;
            let page_links = extract_detail_links(&html, &self.options.base_url)?;
            info!("  Found {} links on page {}", page_links.len(), page);
            links.extend(page_links);
        }

        info!("Collected {} detail links total", links.len());
        Ok(links)
    }

    /// Fetch and parse one detail page
    pub async fn scrape_detail(&self, detail_url: &str) -> Result<Record> {
        let html = self.fetch_html(detail_url).await?;
        extract_record(&html, detail_url)
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RabbitRagError::network(format!("Failed to fetch {}: {}", url, e)))?
            .error_for_status()
            .map_err(|e| RabbitRagError::scrape(format!("Bad response from {}: {}", url, e)))?;

        response
            .text()
            .await
            .map_err(|e| RabbitRagError::scrape(format!("Failed to read body of {}: {}", url, e)))
    }
}
