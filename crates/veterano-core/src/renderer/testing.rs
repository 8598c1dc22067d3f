//! Scripted renderer doubles for tests
//!
//! Pages are queued per fetch; an exhausted queue serves empty pages so
//! pagination terminates naturally, or, for ceiling tests, a fixed set of
//! fragments forever.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};

use super::{PageHandle, RenderSession, Renderer};
use crate::consent;
use crate::error::{Result, VeteranoError};
use crate::extractor;
use crate::scraper::ScraperConfig;

/// Scripted behavior for one page fetch.
#[derive(Debug, Clone)]
pub(crate) enum PageScript {
    /// Navigation succeeds; the capture routine returns these fragments.
    Episodes(Vec<String>),
    /// Navigation succeeds; the capture routine returns no containers.
    Empty,
    /// Navigation fails with a network-class message.
    NavigationError,
    /// Navigation fails with an unclassified renderer message.
    RendererError(String),
    /// The episode container never appears on the loaded page.
    MissingContainers,
}

/// Which consent script, if any, finds a button to click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ConsentScript {
    Absent,
    Structural,
    Text,
}

pub(crate) struct ScriptedPage {
    script: PageScript,
    consent: ConsentScript,
    closed: Arc<AtomicBool>,
}

impl ScriptedPage {
    pub(crate) fn new(script: PageScript) -> Self {
        Self {
            script,
            consent: ConsentScript::Absent,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn with_consent(mut self, consent: ConsentScript) -> Self {
        self.consent = consent;
        self
    }

    pub(crate) fn closed_flag(&self) -> Arc<AtomicBool> {
        self.closed.clone()
    }
}

impl PageHandle for ScriptedPage {
    async fn goto(&self, url: &str, _limit: Duration) -> Result<()> {
        match &self.script {
            PageScript::NavigationError => Err(VeteranoError::Renderer(format!(
                "net::ERR_NAME_NOT_RESOLVED at {url}"
            ))),
            PageScript::RendererError(message) => {
                Err(VeteranoError::Renderer(message.clone()))
            }
            _ => Ok(()),
        }
    }

    async fn wait_for(&self, selector: &str, _limit: Duration) -> Result<()> {
        if selector == extractor::EPISODE_CONTAINER_SELECTOR
            && matches!(self.script, PageScript::MissingContainers)
        {
            return Err(VeteranoError::ElementTimeout(selector.to_string()));
        }
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value> {
        if script == consent::STRUCTURAL_CLICK_SCRIPT {
            return Ok(Value::Bool(self.consent == ConsentScript::Structural));
        }
        if script == consent::TEXT_CLICK_SCRIPT {
            return Ok(Value::Bool(self.consent == ConsentScript::Text));
        }
        if script == extractor::CAPTURE_SCRIPT {
            let fragments = match &self.script {
                PageScript::Episodes(fragments) => fragments.clone(),
                _ => Vec::new(),
            };
            return Ok(json!(fragments));
        }
        Ok(Value::Null)
    }

    async fn close(self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Clone)]
pub(crate) struct ScriptedRenderer {
    pages: Arc<Mutex<VecDeque<ScriptedPage>>>,
    endless_fragments: Option<Vec<String>>,
    fail_open_after: Option<usize>,
    opened: Arc<AtomicUsize>,
    session_closed: Arc<AtomicBool>,
}

impl ScriptedRenderer {
    pub(crate) fn new(pages: Vec<ScriptedPage>) -> Self {
        Self {
            pages: Arc::new(Mutex::new(pages.into())),
            endless_fragments: None,
            fail_open_after: None,
            opened: Arc::new(AtomicUsize::new(0)),
            session_closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Serves the same fragments for every page, forever.
    pub(crate) fn endless(fragments: Vec<String>) -> Self {
        let mut renderer = Self::new(Vec::new());
        renderer.endless_fragments = Some(fragments);
        renderer
    }

    /// Makes `open_page` fail once `limit` pages have been handed out.
    pub(crate) fn fail_open_after(mut self, limit: usize) -> Self {
        self.fail_open_after = Some(limit);
        self
    }

    pub(crate) fn pages_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub(crate) fn session_closed(&self) -> bool {
        self.session_closed.load(Ordering::SeqCst)
    }
}

impl Renderer for ScriptedRenderer {
    type Session = ScriptedSession;

    async fn launch(&self) -> Result<ScriptedSession> {
        Ok(ScriptedSession {
            pages: self.pages.clone(),
            endless_fragments: self.endless_fragments.clone(),
            fail_open_after: self.fail_open_after,
            opened: self.opened.clone(),
            closed: self.session_closed.clone(),
        })
    }
}

pub(crate) struct ScriptedSession {
    pages: Arc<Mutex<VecDeque<ScriptedPage>>>,
    endless_fragments: Option<Vec<String>>,
    fail_open_after: Option<usize>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicBool>,
}

impl RenderSession for ScriptedSession {
    type Page = ScriptedPage;

    async fn open_page(&self) -> Result<ScriptedPage> {
        let already_opened = self.opened.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_open_after {
            if already_opened >= limit {
                return Err(VeteranoError::Renderer("browser crashed".to_string()));
            }
        }
        if let Some(page) = self.pages.lock().expect("page queue poisoned").pop_front() {
            return Ok(page);
        }
        match &self.endless_fragments {
            Some(fragments) => Ok(ScriptedPage::new(PageScript::Episodes(fragments.clone()))),
            None => Ok(ScriptedPage::new(PageScript::Empty)),
        }
    }

    async fn close(self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Config with near-zero waits for scripted runs.
pub(crate) fn fast_config(data_dir: &Path) -> ScraperConfig {
    ScraperConfig {
        base_url: "https://example.com/audio/podcast/prueba/".to_string(),
        data_dir: data_dir.to_path_buf(),
        max_pages: 50,
        inter_page_delay: Duration::ZERO,
        navigation_timeout: Duration::from_millis(50),
        container_timeout: Duration::from_millis(50),
        settle_delay: Duration::ZERO,
        affordance_timeout: Duration::ZERO,
        consent_timeout: Duration::ZERO,
        consent_settle: Duration::ZERO,
    }
}

/// A well-formed container fragment in the site's markup shape.
pub(crate) fn container_fragment(title: &str, date: &str, href: &str) -> String {
    format!(
        r#"<article class="pd pd--h">
  <p class="pd__tl"><a href="/audio/podcast/prueba/episodio/">{title}</a></p>
  <div class="pd__date"><time>{date}</time></div>
  <a class="mm_boton mm_boton_descarga" href="{href}">Descargar</a>
</article>"#
    )
}
