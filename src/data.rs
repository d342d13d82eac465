//! Built-in news blocks.
//!
//! The front page shows these when the `news` collection is empty. They ship
//! with bundled thumbnails, so the resolver only touches them if an image is
//! removed.

use crate::models::NewsItem;

struct Block {
    image: &'static str,
    headline: &'static str,
    source: &'static str,
    date: &'static str,
    href: &'static str,
}

const BLOCKS: &[Block] = &[
    Block {
        image: "/assets/story01.jpg",
        headline: "Raids on Medical Cannabis Dispensaries Threaten Drug-Testing Services",
        source: "The Tyee",
        date: "January 29, 2025",
        href: "https://thetyee.ca/News/2025/01/30/Raids-Medical-Cannabis-Dispensaries/",
    },
    Block {
        image: "/assets/story02.jpg",
        headline: "Police raid Vancouver cannabis dispensaries linked to Dana Larsen ",
        source: "Vancouver Sun",
        date: "January 28, 2025",
        href: "https://potheadbooks.com/",
    },
    Block {
        image: "/assets/story03.jpg",
        headline: "Pot Activist, retailer Dana Larsen sue for not paying supplier",
        source: "North Shore News",
        date: "May 31, 2024",
        href: "https://potheadbooks.com/",
    },
];

/// The default news blocks as owned records.
pub fn news_blocks() -> Vec<NewsItem> {
    BLOCKS
        .iter()
        .map(|block| NewsItem {
            news_image: Some(block.image.to_string()),
            news_headline: block.headline.to_string(),
            news_source: block.source.to_string(),
            news_date: block.date.to_string(),
            href: block.href.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_blocks_are_complete() {
        let blocks = news_blocks();
        assert_eq!(blocks.len(), 3);
        for block in &blocks {
            assert!(!block.needs_image());
            assert!(block.external_href().is_some());
            assert!(block.published_on().is_some(), "{}", block.news_date);
        }
    }
}
