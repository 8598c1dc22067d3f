//! Parsers for the rendered episode listing
//!
//! - `episodes`: parse one episode container fragment into its fields
//! - `dates`: tolerant publication-date parsing used for sorting

pub mod dates;
pub mod episodes;

// Re-export main parsing functions
pub use dates::parse_publication_date;
pub use episodes::{parse_episode_fragment, ParsedEpisode};
