//! Command-line interface definitions.
//!
//! Every option can also come from the environment, which is how the site's
//! build script configures the tool.

use crate::decorate::DEFAULT_CONCURRENCY;
use crate::og::DEFAULT_USER_AGENT;
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Print the preview image of one article (exit status 1 if none)
/// news_thumbs resolve https://thetyee.ca/News/2025/01/30/Raids/
///
/// # Fill missing thumbnails for the whole site
/// news_thumbs decorate -c ./src/content -o ./public/data
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Deadline for each page fetch, in seconds
    #[arg(
        long,
        env = "OG_TIMEOUT_SECS",
        default_value_t = 8,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub timeout_secs: u64,

    /// User-Agent sent with each page fetch
    #[arg(long, env = "OG_USER_AGENT", default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the preview image of a single page
    Resolve {
        /// Absolute URL of the page
        url: String,
    },

    /// Fill missing news thumbnails and write the feed JSON
    Decorate {
        /// Directory holding the `news` and `columns` collections
        #[arg(short, long)]
        content_dir: String,

        /// Output directory for feed.json
        #[arg(short, long)]
        output_dir: String,

        /// Maximum page fetches in flight
        #[arg(long, env = "OG_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },
}
