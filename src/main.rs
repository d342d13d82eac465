//! # News Thumbs
//!
//! Preview-image decoration for a news/commentary site whose stories link out
//! to third-party articles.
//!
//! ## Features
//!
//! - Resolves a page's preview image from its Open Graph or Twitter Card
//!   `<meta>` tags, tolerating odd attribute order and quoting
//! - Loads the site's `news` and `columns` markdown collections
//! - Fills missing `newsImage` values concurrently and writes a JSON feed
//!
//! ## Usage
//!
//! ```sh
//! news_thumbs resolve https://thetyee.ca/News/2025/01/30/Raids/
//! news_thumbs decorate -c ./src/content -o ./public/data
//! ```
//!
//! ## Architecture
//!
//! `decorate` runs as a short pipeline:
//! 1. **Loading**: read both collections (falling back to the built-in news blocks)
//! 2. **Decorating**: resolve thumbnails for items that lack one (bounded concurrency)
//! 3. **Output**: write `feed.json`

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use news_thumbs::cli::{Cli, Command};
use news_thumbs::content::{self, COLUMNS_COLLECTION, NEWS_COLLECTION};
use news_thumbs::models::{ColumnItem, Feed, NewsItem};
use news_thumbs::og::{OgImageResolver, PreviewImage};
use news_thumbs::utils::ensure_writable_dir;
use news_thumbs::{data, decorate, outputs};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    // stdout is reserved for `resolve` output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let resolver = OgImageResolver::with_settings(args.timeout(), &args.user_agent)?;
    debug!(timeout = ?resolver.timeout(), "Resolver ready");

    match args.command {
        Command::Resolve { url } => Ok(run_resolve(&resolver, &url).await),
        Command::Decorate {
            content_dir,
            output_dir,
            concurrency,
        } => {
            run_decorate(&resolver, &content_dir, &output_dir, concurrency).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[instrument(level = "info", skip(resolver))]
async fn run_resolve(resolver: &OgImageResolver, url: &str) -> ExitCode {
    match resolver.resolve(url).await {
        PreviewImage::Found(image) => {
            println!("{image}");
            ExitCode::SUCCESS
        }
        PreviewImage::NotFound => {
            info!("No preview image found");
            ExitCode::FAILURE
        }
    }
}

#[instrument(level = "info", skip(resolver))]
async fn run_decorate(
    resolver: &OgImageResolver,
    content_dir: &str,
    output_dir: &str,
    concurrency: usize,
) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();

    // Fail before any network work if the output can't be written.
    if let Err(e) = ensure_writable_dir(output_dir).await {
        error!(
            path = %output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Load collections ----
    let mut news: Vec<NewsItem> = content::load_named(content_dir, NEWS_COLLECTION).await?;
    if news.is_empty() {
        info!("News collection is empty; using built-in news blocks");
        news = data::news_blocks();
    }
    let columns: Vec<ColumnItem> = content::load_named(content_dir, COLUMNS_COLLECTION).await?;
    info!(news = news.len(), columns = columns.len(), "Loaded content");

    // ---- Decorate ----
    let news = decorate::dedupe(news);
    let (mut news, stats) = decorate::decorate_news(resolver, news, concurrency).await;
    decorate::sort_newest_first(&mut news);

    // ---- Output ----
    let feed = Feed {
        generated_at: Utc::now().to_rfc3339(),
        news,
        columns,
    };
    let path = outputs::json::write_feed(&feed, output_dir).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        path = %path.display(),
        resolved = stats.resolved,
        not_found = stats.not_found,
        "Decoration complete"
    );
    Ok(())
}
