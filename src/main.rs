// Batch cedula lookup against the public voter-registry form.
//
// Reads identifiers from a file (or the command line), queries each one
// through headless Chromium and appends a CSV row per identifier.

use anyhow::Result;
use cedula_scrape::ScraperConfig;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cedula-scrape", version, about = "Look up cedula records into a CSV file")]
struct Cli {
    /// Identifiers to look up; when omitted they are read from --input
    identifiers: Vec<String>,

    /// File with one identifier per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// CSV output path (overwritten)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Query form URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Pause after each identifier, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Navigation timeout, in seconds
    #[arg(long)]
    nav_timeout_secs: Option<u64>,

    /// Timeout for each element wait, in seconds
    #[arg(long)]
    wait_timeout_secs: Option<u64>,

    /// Chrome/Chromium executable to try first (overrides CHROMIUM_PATH)
    #[arg(long)]
    chromium: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> (ScraperConfig, Vec<String>) {
        let mut config = ScraperConfig::default();

        if let Some(path) = self.input {
            config = config.input_path(path);
        }
        if let Some(path) = self.output {
            config = config.output_path(path);
        }
        if let Some(url) = self.endpoint {
            config = config.endpoint(url);
        }
        if let Some(ms) = self.delay_ms {
            config = config.pacing_delay_ms(ms);
        }
        if let Some(secs) = self.nav_timeout_secs {
            config = config.navigation_timeout_ms(secs.saturating_mul(1000));
        }
        if let Some(secs) = self.wait_timeout_secs {
            config = config.element_timeout_ms(secs.saturating_mul(1000));
        }
        if self.chromium.is_some() {
            config = config.chromium_path(self.chromium);
        }

        (config, self.identifiers)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (config, identifiers) = Cli::parse().into_config();

    match cedula_scrape::run(&config, identifiers).await {
        Ok(tally) => {
            info!(
                "Done: {} found, {} failed",
                tally.successes, tally.failures
            );
            Ok(())
        }
        Err(e) => {
            error!("Lookup run aborted: {}", e);
            Err(e.into())
        }
    }
}
