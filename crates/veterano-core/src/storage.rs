//! Artifact persistence
//!
//! Writes the two run artifacts as pretty-printed JSON into a data
//! directory, creating it if absent. The finalizer produces the values;
//! this module only puts them on disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::types::RunResult;

/// Episode list artifact filename.
pub const EPISODES_FILE: &str = "episodes.json";

/// Run statistics artifact filename.
pub const STATS_FILE: &str = "stats.json";

/// Default artifact directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Write both run artifacts into `dir`.
pub fn write_artifacts(result: &RunResult, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    let episodes_path = dir.join(EPISODES_FILE);
    fs::write(&episodes_path, serde_json::to_string_pretty(&result.episodes)?)?;

    let stats_path = dir.join(STATS_FILE);
    fs::write(&stats_path, serde_json::to_string_pretty(&result.stats)?)?;

    debug!(
        episodes = %episodes_path.display(),
        stats = %stats_path.display(),
        "artifacts written"
    );
    Ok(())
}
