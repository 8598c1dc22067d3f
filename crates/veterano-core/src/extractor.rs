//! Per-page fetch and extraction
//!
//! Drives one rendered page from navigation to parsed records and
//! classifies every failure into the stop/continue sentinels the
//! pagination loop runs on: navigation-class failures mean the page does
//! not exist (end of listing), anything else marks the page transiently
//! bad.

use chrono::Utc;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use crate::consent;
use crate::error::Result;
use crate::parser;
use crate::renderer::PageHandle;
use crate::scraper::ScraperConfig;
use crate::types::{Episode, PageOutcome};

/// Selector for one episode entry in the listing.
pub(crate) const EPISODE_CONTAINER_SELECTOR: &str = "article.pd.pd--h";

/// Selector for an entry's download affordance; these render after the
/// containers themselves.
pub(crate) const DOWNLOAD_AFFORDANCE_SELECTOR: &str = ".mm_boton_descarga";

/// Returns each episode container's rendered HTML in document order.
pub(crate) const CAPTURE_SCRIPT: &str = r#"(() => {
  return Array.from(document.querySelectorAll("article.pd.pd--h")).map((el) => el.outerHTML);
})()"#;

/// Fetch and extract one listing page.
///
/// # Arguments
/// * `page` - Fresh page handle for this fetch
/// * `config` - Base URL plus the wait and timeout bounds
/// * `page_number` - 1-based listing page index
pub async fn extract<P: PageHandle>(
    page: &P,
    config: &ScraperConfig,
    page_number: u32,
) -> PageOutcome {
    match extract_records(page, config, page_number).await {
        Ok(records) => PageOutcome::Continue(records),
        Err(err) if err.is_navigation() => {
            info!(page = page_number, error = %err, "navigation failed, treating as end of listing");
            PageOutcome::Stop
        }
        Err(err) => {
            warn!(page = page_number, error = %err, "page extraction failed");
            PageOutcome::TransientFailure
        }
    }
}

async fn extract_records<P: PageHandle>(
    page: &P,
    config: &ScraperConfig,
    page_number: u32,
) -> Result<Vec<Episode>> {
    let url = page_url(&config.base_url, page_number);
    debug!(%url, "fetching page");
    page.goto(&url, config.navigation_timeout).await?;

    consent::dismiss_if_present(page, config).await;

    page.wait_for(EPISODE_CONTAINER_SELECTOR, config.container_timeout)
        .await?;

    // Episode metadata keeps rendering after the containers appear.
    sleep(config.settle_delay).await;
    if let Err(err) = page
        .wait_for(DOWNLOAD_AFFORDANCE_SELECTOR, config.affordance_timeout)
        .await
    {
        debug!(page = page_number, error = %err, "download affordances still rendering, continuing");
    }

    let fragments: Vec<String> = serde_json::from_value(page.evaluate(CAPTURE_SCRIPT).await?)?;
    let base = Url::parse(&config.base_url)?;
    let scraped_at = Utc::now();

    let mut episodes = Vec::new();
    for (index, fragment) in fragments.iter().enumerate() {
        match parser::parse_episode_fragment(fragment, &base) {
            Some(parsed) => episodes.push(Episode {
                id: format!(
                    "episode-{}-{}-{}",
                    scraped_at.timestamp_millis(),
                    page_number,
                    index
                ),
                title: parsed.title,
                audio_url: parsed.audio_url,
                date: parsed.date,
                page: page_number,
                scraped_at,
            }),
            None => debug!(page = page_number, index, "discarding entry with missing fields"),
        }
    }

    info!(
        page = page_number,
        found = fragments.len(),
        kept = episodes.len(),
        "page extracted"
    );
    Ok(episodes)
}

/// Page 1 is the base URL; page N appends `N/`.
pub(crate) fn page_url(base: &str, page_number: u32) -> String {
    if page_number <= 1 {
        base.to_string()
    } else if base.ends_with('/') {
        format!("{base}{page_number}/")
    } else {
        format!("{base}/{page_number}/")
    }
}
