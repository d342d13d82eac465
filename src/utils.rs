//! File system helpers.

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
/// Called before any network work so a bad output path fails fast.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;

    let probe = Path::new(path).join(".news_thumbs_probe");
    fs::write(&probe, b"").await?;
    if let Err(e) = fs::remove_file(&probe).await {
        warn!(probe = %probe.display(), error = %e, "Failed to remove write probe");
    }

    info!("Output directory is writable");
    Ok(())
}
