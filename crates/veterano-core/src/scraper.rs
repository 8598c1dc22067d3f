//! Pagination controller
//!
//! Walks the listing page by page, strictly in order, because the
//! decision to continue past page N depends on page N's outcome: a page
//! that loads but lists nothing means the archive is exhausted, a page
//! that fails to load means the same, and any other per-page failure is
//! transient. Collected episodes survive whatever happens later in the
//! run.

use std::path::PathBuf;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::error::{Result, VeteranoError};
use crate::extractor;
use crate::finalize::finalize;
use crate::renderer::{ChromiumRenderer, PageHandle, RenderSession, Renderer};
use crate::storage;
use crate::types::{Episode, PageOutcome, RunResult};

/// Podcast archive landing page.
const BASE_URL: &str = "https://as.com/audio/podcast/nba-minimo-de-veterano/";

/// Hard ceiling on pages fetched in one run.
const MAX_PAGES: u32 = 50;

/// Pacing between page fetches.
const INTER_PAGE_DELAY: Duration = Duration::from_millis(2000);

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
const CONTAINER_TIMEOUT: Duration = Duration::from_secs(15);
const SETTLE_DELAY: Duration = Duration::from_secs(3);
const AFFORDANCE_TIMEOUT: Duration = Duration::from_secs(5);
const CONSENT_TIMEOUT: Duration = Duration::from_secs(5);
const CONSENT_SETTLE: Duration = Duration::from_secs(2);

/// Configuration for one scraping run.
///
/// Defaults are the values the production site needs; tests shrink the
/// waits. None of this is read from flags or the environment.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Listing base URL; page N is fetched at `{base_url}N/`
    pub base_url: String,
    /// Directory the two JSON artifacts are written to
    pub data_dir: PathBuf,
    /// Hard ceiling on pages fetched in one run
    pub max_pages: u32,
    /// Pacing applied between page fetches
    pub inter_page_delay: Duration,
    /// Bound on navigation plus page load
    pub navigation_timeout: Duration,
    /// Bound on the wait for episode containers to appear
    pub container_timeout: Duration,
    /// Unconditional wait after containers appear
    pub settle_delay: Duration,
    /// Bound on the non-fatal wait for download affordances
    pub affordance_timeout: Duration,
    /// Bound on the consent-button text scan
    pub consent_timeout: Duration,
    /// Unconditional wait after clicking a consent button
    pub consent_settle: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            data_dir: PathBuf::from(storage::DEFAULT_DATA_DIR),
            max_pages: MAX_PAGES,
            inter_page_delay: INTER_PAGE_DELAY,
            navigation_timeout: NAVIGATION_TIMEOUT,
            container_timeout: CONTAINER_TIMEOUT,
            settle_delay: SETTLE_DELAY,
            affordance_timeout: AFFORDANCE_TIMEOUT,
            consent_timeout: CONSENT_TIMEOUT,
            consent_settle: CONSENT_SETTLE,
        }
    }
}

/// Scraper for the podcast's paginated episode archive.
///
/// Stateless over an explicit configuration; one call to [`run`] performs
/// a full pass and persists the artifacts.
///
/// # Example
/// ```no_run
/// use veterano_core::VeteranoScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), veterano_core::VeteranoError> {
///     let scraper = VeteranoScraper::new();
///     let result = scraper.run().await?;
///     println!("{} episodios", result.stats.total_episodes);
///     Ok(())
/// }
/// ```
///
/// [`run`]: VeteranoScraper::run
pub struct VeteranoScraper<R: Renderer = ChromiumRenderer> {
    config: ScraperConfig,
    renderer: R,
}

impl VeteranoScraper<ChromiumRenderer> {
    /// Create a scraper with the default configuration and the headless
    /// Chromium renderer.
    pub fn new() -> Self {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a scraper with a custom configuration.
    pub fn with_config(config: ScraperConfig) -> Self {
        Self {
            config,
            renderer: ChromiumRenderer,
        }
    }
}

impl Default for VeteranoScraper<ChromiumRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> VeteranoScraper<R> {
    /// Create a scraper over a custom renderer.
    ///
    /// Useful for testing or for embedding an alternative browser
    /// backend.
    pub fn with_renderer(config: ScraperConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    /// Get the active configuration.
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Run a full scraping pass.
    ///
    /// Fetches pages sequentially until the listing ends, a navigation
    /// failure marks the end, or the page ceiling is reached; then
    /// deduplicates, sorts and persists the results. The renderer session
    /// is released on every exit path. If an error escapes the loop after
    /// records were collected, those records are finalized and persisted
    /// before the error is returned.
    ///
    /// # Errors
    /// - `VeteranoError::EmptyFirstPage` if page 1 yields no episodes
    /// - Renderer or I/O errors from session handling and persistence
    pub async fn run(&self) -> Result<RunResult> {
        info!(url = %self.config.base_url, "starting scrape");
        let session = self.renderer.launch().await?;

        let mut episodes = Vec::new();
        let crawl_result = self.crawl(&session, &mut episodes).await;

        if let Err(err) = session.close().await {
            warn!(error = %err, "failed to close renderer session");
        }

        match crawl_result {
            Ok(()) => {
                let result = finalize(episodes);
                storage::write_artifacts(&result, &self.config.data_dir)?;
                info!(
                    episodes = result.stats.total_episodes,
                    pages = result.stats.pages_scraped,
                    duplicates_removed = result.stats.duplicates_removed,
                    "scrape complete"
                );
                Ok(result)
            }
            Err(err) => {
                if episodes.is_empty() {
                    error!(error = %err, "scrape failed with nothing collected");
                } else {
                    error!(
                        error = %err,
                        collected = episodes.len(),
                        "scrape failed, persisting what was collected"
                    );
                    let result = finalize(episodes);
                    if let Err(save_err) =
                        storage::write_artifacts(&result, &self.config.data_dir)
                    {
                        warn!(error = %save_err, "failed to persist partial results");
                    }
                }
                Err(err)
            }
        }
    }

    async fn crawl(&self, session: &R::Session, episodes: &mut Vec<Episode>) -> Result<()> {
        // Page 1 is assumed populated whenever the site is reachable;
        // anything else aborts the run with nothing saved.
        match self.fetch_page(session, 1).await? {
            PageOutcome::Continue(records) if !records.is_empty() => {
                episodes.extend(records);
            }
            _ => return Err(VeteranoError::EmptyFirstPage),
        }

        for page_number in 2..=self.config.max_pages {
            match self.fetch_page(session, page_number).await? {
                PageOutcome::Continue(records) if records.is_empty() => {
                    info!(last_page = page_number - 1, "no more results, stopping");
                    break;
                }
                PageOutcome::Continue(records) => {
                    episodes.extend(records);
                    sleep(self.config.inter_page_delay).await;
                }
                PageOutcome::Stop => {
                    info!(last_page = page_number - 1, "listing ended");
                    break;
                }
                PageOutcome::TransientFailure => {
                    warn!(page = page_number, "skipping failed page");
                    sleep(self.config.inter_page_delay).await;
                }
            }
        }

        Ok(())
    }

    async fn fetch_page(&self, session: &R::Session, page_number: u32) -> Result<PageOutcome> {
        let page = session.open_page().await?;
        let outcome = extractor::extract(&page, &self.config, page_number).await;
        if let Err(err) = page.close().await {
            debug!(page = page_number, error = %err, "failed to close page handle");
        }
        Ok(outcome)
    }
}
