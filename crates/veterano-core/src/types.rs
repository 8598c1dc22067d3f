//! Data types for the podcast scraper
//!
//! Core data structures shared across the crate. Records serialize with
//! camelCase field names, matching the persisted artifact shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scraped podcast episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Opaque token, unique within one run
    pub id: String,
    /// Normalized episode title (link markup stripped)
    pub title: String,
    /// Absolute URL of the audio resource
    pub audio_url: String,
    /// Publication date as scraped (free text, used later as a sort token)
    pub date: String,
    /// 1-based listing page the episode was found on
    pub page: u32,
    /// When the record was extracted
    pub scraped_at: DateTime<Utc>,
}

/// Statistics for one completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    /// Unique episodes after deduplication
    pub total_episodes: usize,
    /// When the run finished
    pub scraped_at: DateTime<Utc>,
    /// Distinct listing pages represented in the raw accumulated sequence
    pub pages_scraped: usize,
    /// Raw count minus unique count
    pub duplicates_removed: usize,
}

/// Finalized output of one full scraping pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Deduplicated episodes, sorted by publication date descending
    pub episodes: Vec<Episode>,
    /// Run statistics
    pub stats: RunStats,
}

/// Outcome of fetching one listing page.
///
/// Replaces the null/empty-array sentinel overloading of ad hoc page
/// results with an explicit tag the pagination loop runs on.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// Page loaded and parsed; an empty vector is the normal
    /// end-of-listing signal
    Continue(Vec<Episode>),
    /// Navigation-class failure; there are no more pages
    Stop,
    /// Extraction-class failure; the page contributes nothing but
    /// pagination keeps going
    TransientFailure,
}
