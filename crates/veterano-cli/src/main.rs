//! Command-line runner for the Veterano podcast scraper.
//!
//! Running the binary performs one full scraping pass with the built-in
//! configuration; there are no flags. Embed `veterano-core` directly to
//! use the scraper without this entry point.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use veterano_core::VeteranoScraper;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt().with_env_filter(filter).with_target(false).init();

    let scraper = VeteranoScraper::new();
    match scraper.run().await {
        Ok(result) => {
            for episode in result.episodes.iter().take(3) {
                info!(title = %episode.title, audio = %episode.audio_url, "sample episode");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "scrape failed");
            ExitCode::FAILURE
        }
    }
}
