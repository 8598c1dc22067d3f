//! Run finalization
//!
//! Pure function over the accumulated episode sequence: deduplicate by
//! title (first occurrence wins), sort by publication date descending,
//! compute run statistics. Persistence lives in `storage`.

use std::collections::HashSet;

use chrono::Utc;

use crate::parser::parse_publication_date;
use crate::types::{Episode, RunResult, RunStats};

/// Finalize the accumulated episodes into the run's output.
///
/// Titles repeat across listing pages when entries shift between fetches;
/// the first occurrence in accumulation order is kept. Episodes whose
/// dates don't parse keep their text but sort after the parseable ones.
pub fn finalize(episodes: Vec<Episode>) -> RunResult {
    let raw_count = episodes.len();
    let pages_scraped = episodes
        .iter()
        .map(|episode| episode.page)
        .collect::<HashSet<_>>()
        .len();

    let mut seen_titles = HashSet::new();
    let mut unique: Vec<Episode> = episodes
        .into_iter()
        .filter(|episode| seen_titles.insert(episode.title.clone()))
        .collect();

    unique.sort_by(|a, b| parse_publication_date(&b.date).cmp(&parse_publication_date(&a.date)));

    let stats = RunStats {
        total_episodes: unique.len(),
        scraped_at: Utc::now(),
        pages_scraped,
        duplicates_removed: raw_count - unique.len(),
    };

    RunResult {
        episodes: unique,
        stats,
    }
}
