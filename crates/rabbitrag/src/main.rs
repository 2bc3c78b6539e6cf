use anyhow::Result;
use clap::{Parser, Subcommand};
use rabbitrag_common::{logger, AppConfig};
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        // Fallback to default dotenv behavior
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "rabbitrag")]
#[command(about = "rabbitrag - adoption listing scraper and grounded Q&A chat", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the adoption listing into the record file
    Scrape {
        /// Record file to write
        #[arg(long)]
        output: Option<PathBuf>,

        /// Number of listing pages to visit
        #[arg(long)]
        pages: Option<u32>,
    },

    /// Answer questions grounded in the record file (default)
    Chat {
        /// Record file to read
        #[arg(long)]
        records: Option<PathBuf>,

        /// Chunks retrieved per question
        #[arg(long)]
        top_n: Option<usize>,

        /// Skip records that fail to embed instead of aborting
        #[arg(long)]
        skip_failed: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env before AppConfig::from_env so project-root settings win over cwd
    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Scrape { output, pages }) => {
            if let Some(output) = output {
                config.records_path = output;
            }
            if let Some(pages) = pages {
                config.total_pages = pages;
            }
            config.validate()?;

            logger::setup_console_logging(&config.log_level)?;
            tracing::info!("Scraping {} listing pages", config.total_pages);

            rabbitrag::run_scrape(&config).await?;
        }
        Some(Commands::Chat {
            records,
            top_n,
            skip_failed,
        }) => {
            if let Some(records) = records {
                config.records_path = records;
            }
            if let Some(top_n) = top_n {
                config.top_n = top_n;
            }
            config.skip_failed_records |= skip_failed;

            logger::setup_logging(&config.log_dir, &config.log_level)?;
            tracing::info!("Chat model: {}, embedding model: {}", config.llm_model, config.embedding_model);

            rabbitrag::run_chat(&config).await?;
        }
        None => {
            logger::setup_logging(&config.log_dir, &config.log_level)?;
            tracing::info!("rabbitrag starting chat with default configuration...");

            rabbitrag::run_chat(&config).await?;
        }
    }

    Ok(())
}
