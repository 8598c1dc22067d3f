//! Headless Chromium binding for the renderer adapter
//!
//! Launches a sandboxless headless browser, pumps its CDP event stream on
//! a background task, and implements the page-handle contract with
//! timeout-bounded navigation and polled selector waits.

use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};
use tracing::debug;

use super::{PageHandle, RenderSession, Renderer};
use crate::error::{Result, VeteranoError};

/// User-Agent mimicking a real desktop browser; the site serves a reduced
/// page to obvious automation.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Polling interval for selector waits.
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

fn renderer_error(err: impl std::fmt::Display) -> VeteranoError {
    VeteranoError::Renderer(err.to_string())
}

/// Renderer backed by a local headless Chromium instance.
#[derive(Debug, Clone, Default)]
pub struct ChromiumRenderer;

impl Renderer for ChromiumRenderer {
    type Session = ChromiumSession;

    async fn launch(&self) -> Result<ChromiumSession> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .build()
            .map_err(VeteranoError::Renderer)?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(renderer_error)?;
        let driver = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });
        debug!("headless browser launched");

        Ok(ChromiumSession { browser, driver })
    }
}

/// One running browser instance plus its event-handler task.
pub struct ChromiumSession {
    browser: Browser,
    driver: JoinHandle<()>,
}

impl RenderSession for ChromiumSession {
    type Page = ChromiumPage;

    async fn open_page(&self) -> Result<ChromiumPage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(renderer_error)?;
        page.set_user_agent(USER_AGENT).await.map_err(renderer_error)?;
        Ok(ChromiumPage { page })
    }

    async fn close(mut self) -> Result<()> {
        match self.browser.close().await {
            Ok(_) => {
                let _ = self.driver.await;
                Ok(())
            }
            Err(err) => {
                self.driver.abort();
                Err(renderer_error(err))
            }
        }
    }
}

/// One open browser tab.
pub struct ChromiumPage {
    page: chromiumoxide::Page,
}

impl PageHandle for ChromiumPage {
    async fn goto(&self, url: &str, limit: Duration) -> Result<()> {
        let navigation = async {
            self.page.goto(url).await.map_err(renderer_error)?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(renderer_error)?;
            Ok(())
        };

        match timeout(limit, navigation).await {
            Ok(result) => result,
            Err(_) => Err(VeteranoError::Navigation(format!(
                "navigation to {url} timed out"
            ))),
        }
    }

    async fn wait_for(&self, selector: &str, limit: Duration) -> Result<()> {
        let probe = format!(
            "document.querySelector({}) !== null",
            serde_json::to_string(selector)?
        );
        let deadline = Instant::now() + limit;

        loop {
            let found = self
                .page
                .evaluate(probe.as_str())
                .await
                .map_err(renderer_error)?
                .into_value::<bool>()
                .unwrap_or(false);
            if found {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(VeteranoError::ElementTimeout(selector.to_string()));
            }
            sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn evaluate(&self, script: &str) -> Result<Value> {
        self.page
            .evaluate(script)
            .await
            .map_err(renderer_error)?
            .into_value::<Value>()
            .map_err(renderer_error)
    }

    async fn close(self) -> Result<()> {
        self.page.close().await.map_err(renderer_error)
    }
}
