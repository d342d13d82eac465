//! Data models for the site's content collections and the generated feed.
//!
//! - [`NewsItem`]: an externally-linked news story (the `news` collection)
//! - [`ColumnItem`]: a commentary column (the `columns` collection)
//! - [`Feed`]: everything written out by a `decorate` run
//!
//! Field names serialize in camelCase to stay compatible with the markdown
//! front matter the site's editors already write.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

/// Display format of `newsDate`, e.g. `January 29, 2025`.
pub const NEWS_DATE_FORMAT: &str = "%B %d, %Y";

/// A news story linking to a third-party article.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Thumbnail shown next to the headline. Filled from the linked page's
    /// Open Graph metadata when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_image: Option<String>,
    pub news_headline: String,
    /// Name of the outlet that published the story.
    pub news_source: String,
    pub news_date: String,
    /// Link to the original article.
    pub href: String,
}

impl NewsItem {
    /// `true` when the item has no usable thumbnail yet.
    pub fn needs_image(&self) -> bool {
        self.news_image.as_deref().is_none_or(|image| image.trim().is_empty())
    }

    /// The article link, if it is an absolute `http`/`https` URL.
    ///
    /// Relative and internal links are never sent to the resolver.
    pub fn external_href(&self) -> Option<Url> {
        Url::parse(&self.href)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
    }

    /// Publication date parsed from [`NEWS_DATE_FORMAT`].
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.news_date.trim(), NEWS_DATE_FORMAT).ok()
    }
}

/// An opinion column. Columns carry no image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColumnItem {
    pub headline: String,
    pub source: String,
    pub date: String,
    pub href: String,
}

/// Output of a `decorate` run.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
    pub news: Vec<NewsItem>,
    pub columns: Vec<ColumnItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(image: Option<&str>, href: &str, date: &str) -> NewsItem {
        NewsItem {
            news_image: image.map(str::to_string),
            news_headline: "Headline".to_string(),
            news_source: "The Tyee".to_string(),
            news_date: date.to_string(),
            href: href.to_string(),
        }
    }

    #[test]
    fn test_news_item_deserializes_camel_case() {
        let yaml = r#"
newsHeadline: Raids on Medical Cannabis Dispensaries
newsSource: The Tyee
newsDate: January 29, 2025
href: https://thetyee.ca/News/2025/01/30/Raids/
"#;
        let news: NewsItem = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(news.news_image, None);
        assert_eq!(news.news_source, "The Tyee");
        assert_eq!(news.href, "https://thetyee.ca/News/2025/01/30/Raids/");
    }

    #[test]
    fn test_news_item_requires_headline() {
        let yaml = "newsSource: X\nnewsDate: May 31, 2024\nhref: https://x.test/\n";
        assert!(serde_yaml::from_str::<NewsItem>(yaml).is_err());
    }

    #[test]
    fn test_news_item_serialization_skips_missing_image() {
        let json = serde_json::to_string(&item(None, "https://x.test/", "May 31, 2024")).unwrap();
        assert!(!json.contains("newsImage"));
        assert!(json.contains("\"newsHeadline\":\"Headline\""));

        let json = serde_json::to_string(&item(Some("a.jpg"), "https://x.test/", "")).unwrap();
        assert!(json.contains("\"newsImage\":\"a.jpg\""));
    }

    #[test]
    fn test_needs_image() {
        assert!(item(None, "", "").needs_image());
        assert!(item(Some(""), "", "").needs_image());
        assert!(item(Some("  "), "", "").needs_image());
        assert!(!item(Some("/assets/story01.jpg"), "", "").needs_image());
    }

    #[test]
    fn test_external_href() {
        assert!(item(None, "https://thetyee.ca/News/", "").external_href().is_some());
        assert!(item(None, "http://potheadbooks.com/", "").external_href().is_some());
        assert!(item(None, "/columns/first", "").external_href().is_none());
        assert!(item(None, "mailto:desk@example.com", "").external_href().is_none());
        assert!(item(None, "", "").external_href().is_none());
    }

    #[test]
    fn test_published_on() {
        let date = item(None, "", "January 29, 2025").published_on();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 29));
        assert_eq!(item(None, "", "May 31, 2024").published_on(), NaiveDate::from_ymd_opt(2024, 5, 31));
        assert_eq!(item(None, "", "sometime").published_on(), None);
    }

    #[test]
    fn test_feed_serialization() {
        let feed = Feed {
            generated_at: "2025-05-06T12:00:00+00:00".to_string(),
            news: vec![],
            columns: vec![ColumnItem {
                headline: "On Raids".to_string(),
                source: "Staff".to_string(),
                date: "February 1, 2025".to_string(),
                href: "/columns/on-raids".to_string(),
            }],
        };
        let json = serde_json::to_string(&feed).unwrap();
        assert!(json.contains("\"generatedAt\""));
        assert!(json.contains("On Raids"));
    }
}
