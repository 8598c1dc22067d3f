//! Error types for the podcast scraper
//!
//! The taxonomy mirrors how the pagination loop reacts to failures:
//! navigation-class errors terminate pagination normally, everything else
//! on a page is transient, and an empty first page is fatal for the run.

use thiserror::Error;

/// Substrings in renderer messages that mark a network-level failure to
/// load a URL, as opposed to a failure on a loaded page.
const NAVIGATION_MARKERS: [&str; 2] = ["net::ERR_", "404"];

/// Error type for scraper operations
#[derive(Error, Debug)]
pub enum VeteranoError {
    /// Browser-level failure (launch, CDP call, script evaluation)
    #[error("renderer error: {0}")]
    Renderer(String),

    /// Failed to load a page URL
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// An expected element never appeared within its bounded wait
    #[error("timed out waiting for selector: {0}")]
    ElementTimeout(String),

    /// The first listing page yielded no episodes
    #[error("first page returned no episodes")]
    EmptyFirstPage,

    /// Invalid or unresolvable URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error while persisting artifacts
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VeteranoError {
    /// Whether this failure means the requested page does not exist or
    /// could not be reached, which the pagination loop reads as "no more
    /// pages" rather than as an error.
    pub fn is_navigation(&self) -> bool {
        match self {
            VeteranoError::Navigation(_) => true,
            VeteranoError::Renderer(message) => NAVIGATION_MARKERS
                .iter()
                .any(|marker| message.contains(marker)),
            _ => false,
        }
    }
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, VeteranoError>;
