//! Cookie-consent dismissal
//!
//! The site gates first visits behind a consent overlay. Dismissal is
//! best effort: a known structural selector first, then a bounded scan of
//! button texts. Absence of the popup is the normal case, so nothing in
//! here fails the page fetch.

use std::time::Duration;

use serde_json::Value;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::error::Result;
use crate::renderer::PageHandle;
use crate::scraper::ScraperConfig;

/// Clicks the consent-accept control by its known selector.
pub(crate) const STRUCTURAL_CLICK_SCRIPT: &str = r#"(() => {
  const btn = document.querySelector("button._button_10koz_3");
  if (!btn) return false;
  btn.click();
  return true;
})()"#;

/// Clicks the first button whose text reads as accept/continue.
pub(crate) const TEXT_CLICK_SCRIPT: &str = r#"(() => {
  const match = Array.from(document.querySelectorAll("button"))
    .find((btn) => /aceptar|continuar/i.test(btn.textContent || ""));
  if (!match) return false;
  match.click();
  return true;
})()"#;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Dismiss the consent overlay if one is present.
///
/// Never propagates a failure: lookup errors are logged and swallowed so
/// the page fetch proceeds either way.
///
/// # Arguments
/// * `page` - Loaded page handle to scan for the consent control
/// * `config` - Supplies the scan bound and the post-click settle delay
pub async fn dismiss_if_present<P: PageHandle>(page: &P, config: &ScraperConfig) {
    match try_dismiss(page, config).await {
        Ok(true) => {
            info!("consent popup dismissed");
            sleep(config.consent_settle).await;
        }
        Ok(false) => debug!("no consent popup found"),
        Err(err) => debug!(error = %err, "consent lookup failed, continuing"),
    }
}

async fn try_dismiss<P: PageHandle>(page: &P, config: &ScraperConfig) -> Result<bool> {
    if clicked(page.evaluate(STRUCTURAL_CLICK_SCRIPT).await?) {
        return Ok(true);
    }

    let deadline = Instant::now() + config.consent_timeout;
    loop {
        if clicked(page.evaluate(TEXT_CLICK_SCRIPT).await?) {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        sleep(POLL_INTERVAL).await;
    }
}

fn clicked(value: Value) -> bool {
    value.as_bool().unwrap_or(false)
}
