//! rabbitrag Ingestion
//!
//! Scrapes the adoption listing iframe into `Record`s

mod parse;
mod pipeline;

pub use parse::{extract_detail_links, extract_record, listing_url};
pub use pipeline::{ListingScraper, ScrapeOptions};
