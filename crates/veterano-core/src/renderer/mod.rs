//! Renderer adapter for JS-driven pages
//!
//! The listing pages are rendered client-side, so the scraper drives a
//! real browser through this seam: navigate, await DOM conditions, run an
//! in-page routine that returns plain data. The core never touches a
//! browser API directly; `chromium` binds the traits to a headless
//! Chromium instance.

use std::time::Duration;

use serde_json::Value;

use crate::error::Result;

pub mod chromium;
#[cfg(test)]
pub(crate) mod testing;

pub use chromium::ChromiumRenderer;

/// Launches rendering sessions.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    type Session: RenderSession;

    /// Start a browser session.
    async fn launch(&self) -> Result<Self::Session>;
}

/// A live browser session that can open pages.
#[allow(async_fn_in_trait)]
pub trait RenderSession {
    type Page: PageHandle;

    /// Open a fresh page handle.
    async fn open_page(&self) -> Result<Self::Page>;

    /// Shut the session down, releasing the browser.
    async fn close(self) -> Result<()>;
}

/// A handle to one rendered page.
#[allow(async_fn_in_trait)]
pub trait PageHandle {
    /// Navigate to `url` and wait for the load to finish, bounded by `limit`.
    async fn goto(&self, url: &str, limit: Duration) -> Result<()>;

    /// Wait until `selector` matches at least one element, bounded by `limit`.
    async fn wait_for(&self, selector: &str, limit: Duration) -> Result<()>;

    /// Run a script against the rendered DOM and return its result as
    /// plain data.
    async fn evaluate(&self, script: &str) -> Result<Value>;

    /// Release the page handle.
    async fn close(self) -> Result<()>;
}
