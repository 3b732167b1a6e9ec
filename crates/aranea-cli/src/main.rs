use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use aranea_client::{ReqwestFetcher, ScraperExtractor};
use aranea_core::traits::LinkExtractor;
use aranea_core::{CrawlConfig, Crawler};

#[derive(Parser)]
#[command(
    name = "aranea",
    version,
    about = "Breadth-first web crawler",
    after_help = "Example: aranea -f 1 -m 10 https://example.com"
)]
struct Cli {
    /// Seed URL to start crawling from
    website: String,

    /// Maximum number of pages to visit (0 = unbounded)
    #[arg(short = 'm', long, env = "ARANEA_MAX_VISITS")]
    max_visits: Option<usize>,

    /// Seconds between fetches
    #[arg(short = 'f', long, env = "ARANEA_FREQUENCY")]
    frequency: Option<u64>,

    /// Path to a JSON config file with "max_visits" and "frequency" keys
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

/// File-based settings. Flags and environment variables take precedence.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    max_visits: Option<usize>,
    frequency: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("aranea=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => FileConfig::default(),
    };

    let max_visits = cli.max_visits.or(file.max_visits).unwrap_or(0);
    let frequency = Duration::from_secs(cli.frequency.or(file.frequency).unwrap_or(10));

    let config = CrawlConfig::new()
        .with_max_visits(max_visits)
        .with_frequency(frequency);

    tracing::info!(
        seed = %cli.website,
        max_visits,
        frequency_secs = frequency.as_secs(),
        "starting crawl"
    );

    let fetcher = ReqwestFetcher::new().context("failed to create HTTP client")?;
    let seed = cli.website.clone();

    let mut crawler = Crawler::new(&cli.website, fetcher, ScraperExtractor::new(), config)
        .context("failed to create crawler")?
        .with_filter(move |link| link.to_string().starts_with(&seed))
        .with_visitor(|link, content| {
            let found = ScraperExtractor::new().extract_links(link, content);
            println!("Visited: {link}");
            println!("Found:");
            for target in &found {
                println!("\t{target}");
            }
        });

    let outcome = crawler.crawl().await.context("crawl failed")?;
    tracing::info!(?outcome, visits = crawler.num_visits(), "done");

    Ok(())
}

fn load_config_file(path: &Path) -> Result<FileConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    serde_json::from_str(&raw).context("invalid JSON in config file")
}
