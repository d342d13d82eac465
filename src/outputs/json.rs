//! JSON feed output.
//!
//! A `decorate` run writes a single file that the site build reads at render
//! time:
//!
//! ```text
//! output_dir/
//! └── feed.json
//! ```

use crate::models::Feed;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

pub const FEED_FILENAME: &str = "feed.json";

/// Serialize `feed` as pretty JSON into `{output_dir}/feed.json`.
///
/// Creates `output_dir` if needed and returns the written path.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_feed(feed: &Feed, output_dir: &str) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(feed)?;

    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(output_dir, error = %e, "Failed to create output dir");
        return Err(e.into());
    }

    let path = PathBuf::from(output_dir).join(FEED_FILENAME);
    info!(path = %path.display(), "Writing JSON");
    fs::write(&path, json).await?;
    info!(
        path = %path.display(),
        news = feed.news.len(),
        columns = feed.columns.len(),
        "Wrote feed"
    );

    Ok(path)
}
