//! Fill missing news thumbnails from the linked articles.
//!
//! This is the resolver's main caller. Only items that lack an image and link
//! to an absolute `http`/`https` URL are looked up; everything else passes
//! through untouched. Lookups run concurrently with a bounded number in
//! flight, and results are written back by index so item order never depends
//! on which page answered first.

use crate::models::NewsItem;
use crate::og::{OgImageResolver, PreviewImage};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use std::cmp::Reverse;
use tracing::{debug, info, instrument};

/// Default number of page fetches in flight.
pub const DEFAULT_CONCURRENCY: usize = 12;

/// Counters for one decoration pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecorateStats {
    pub total: usize,
    /// Items that needed an image and had an external link.
    pub eligible: usize,
    pub resolved: usize,
    pub not_found: usize,
}

/// Resolve images for every eligible item in `items`.
#[instrument(level = "info", skip_all, fields(count = items.len(), concurrency = concurrency))]
pub async fn decorate_news(
    resolver: &OgImageResolver,
    mut items: Vec<NewsItem>,
    concurrency: usize,
) -> (Vec<NewsItem>, DecorateStats) {
    let targets: Vec<(usize, String)> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.needs_image())
        .filter_map(|(i, item)| item.external_href().map(|_| (i, item.href.clone())))
        .collect();

    let mut stats = DecorateStats {
        total: items.len(),
        eligible: targets.len(),
        ..DecorateStats::default()
    };

    let results: Vec<(usize, PreviewImage)> = stream::iter(targets)
        .map(|(i, href)| async move {
            let image = resolver.resolve(&href).await;
            debug!(index = i, %href, found = image.is_found(), "Resolved preview image");
            (i, image)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    for (i, image) in results {
        match image {
            PreviewImage::Found(url) => {
                items[i].news_image = Some(url);
                stats.resolved += 1;
            }
            PreviewImage::NotFound => {
                items[i].news_image = None;
                stats.not_found += 1;
            }
        }
    }

    info!(
        total = stats.total,
        eligible = stats.eligible,
        resolved = stats.resolved,
        not_found = stats.not_found,
        "Decorated news items"
    );
    (items, stats)
}

/// Collapse items with the same headline and link; the first occurrence wins.
///
/// Distinct stories may share a link (an outlet's landing page), so the link
/// alone is not a duplicate.
pub fn dedupe(items: Vec<NewsItem>) -> Vec<NewsItem> {
    items
        .into_iter()
        .unique_by(|item| (item.news_headline.clone(), item.href.clone()))
        .collect()
}

/// Order newest-first by `newsDate`. Undated items keep their relative order
/// at the end.
pub fn sort_newest_first(items: &mut [NewsItem]) {
    items.sort_by_key(|item| match item.published_on() {
        Some(date) => (false, Reverse(Some(date))),
        None => (true, Reverse(None)),
    });
}
