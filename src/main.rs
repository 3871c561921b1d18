use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

use mbta_scraper::config::Config;
use mbta_scraper::infra::http_client::ReqwestFetcher;
use mbta_scraper::logging;
use mbta_scraper::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "mbta_scraper")]
#[command(about = "Scrape the MBTA public meetings listing into a CSV file")]
#[command(version)]
struct Cli {
    /// Listing page to fetch (overrides config and MBTA_PAGE_URL)
    #[arg(long)]
    url: Option<String>,
    /// CSV file to write (overrides config and MBTA_OUTPUT_PATH)
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// TOML config file (default: ./mbta_scraper.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fail on the first card missing a title, date, location or link
    #[arg(long)]
    strict: bool,
    /// Also write JSON logs to a daily-rotated file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(url) = self.url {
            config.page_url = url;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if self.strict {
            config.strict = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let _guard = logging::init_logging(cli.log_dir.as_deref())?;

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env();
    cli.apply(&mut config);
    config.validate()?;

    let fetcher = ReqwestFetcher::new(&config.user_agent, config.timeout_secs)?;
    let result = match Pipeline::run(&config, &fetcher) {
        Ok(result) => result,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            return Err(e).with_context(|| format!("scraping {} failed", config.page_url));
        }
    };

    println!("\n📊 Pipeline Results:");
    println!("   Cards found: {}", result.cards_found);
    println!("   Written: {}", result.records_written);
    println!("   Skipped: {}", result.skipped);
    println!("   Output file: {}", result.output_file.display());

    if !result.errors.is_empty() {
        println!("\n⚠️  Skipped cards:");
        for error in &result.errors {
            println!("   - {}", error);
        }
    }
    Ok(())
}
