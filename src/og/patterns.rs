//! Ordered meta-tag matchers for preview image discovery.
//!
//! Pages in the wild disagree on attribute order and quoting, so instead of
//! parsing the DOM we try a fixed list of independent patterns, from the most
//! standard form to the least, and keep the first hit. Open Graph always wins
//! over Twitter Card tags because every `og:image` form comes first.
//!
//! The captured attribute value is returned exactly as it appears in the
//! markup: no entity decoding, no trimming, no URL resolution.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// A single named matcher. Whichever capture group participates in the match
/// holds the image URL.
#[derive(Debug)]
pub struct MetaPattern {
    /// Short label used in trace output.
    pub label: &'static str,
    regex: Regex,
}

impl MetaPattern {
    fn new(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            regex: Regex::new(pattern).unwrap(),
        }
    }

    /// Return the captured attribute value if this pattern matches `html`.
    pub fn capture<'h>(&self, html: &'h str) -> Option<&'h str> {
        self.regex
            .captures(html)
            .and_then(|caps| caps.iter().skip(1).flatten().next())
            .map(|m| m.as_str())
            .filter(|value| !value.is_empty())
    }
}

/// A `content` value in any quoting style: double, single, or bare up to
/// whitespace.
const LENIENT_CONTENT: &str = r#"content=(?:"([^"]+)"|'([^']+)'|([^\s"'>]+))"#;

/// The fallback chain, tried in order.
pub static PATTERNS: Lazy<Vec<MetaPattern>> = Lazy::new(|| {
    vec![
        MetaPattern::new(
            "og:image quoted, property first",
            r#"(?i)<meta[^>]+property=["']og:image["'][^>]+content=["']([^"']+)["']"#,
        ),
        MetaPattern::new(
            "og:image quoted, content first",
            r#"(?i)<meta[^>]+content=["']([^"']+)["'][^>]+property=["']og:image["']"#,
        ),
        MetaPattern::new(
            "og:image unquoted, content first",
            &format!(r#"(?i)<meta[^>]+{LENIENT_CONTENT}\s[^>]*property=["']?og:image(?:["'\s/>]|$)"#),
        ),
        MetaPattern::new(
            "og:image unquoted, property first",
            &format!(r#"(?i)<meta[^>]+property=["']?og:image["']?\s[^>]*{LENIENT_CONTENT}"#),
        ),
        MetaPattern::new(
            "twitter:image quoted, name first",
            r#"(?i)<meta[^>]+name=["']twitter:image["'][^>]+content=["']([^"']+)["']"#,
        ),
        MetaPattern::new(
            "twitter:image quoted, content first",
            r#"(?i)<meta[^>]+content=["']([^"']+)["'][^>]+name=["']twitter:image["']"#,
        ),
        MetaPattern::new(
            "twitter:image unquoted, content first",
            &format!(r#"(?i)<meta[^>]+{LENIENT_CONTENT}\s[^>]*name=["']?twitter:image(?:["'\s/>]|$)"#),
        ),
    ]
});

/// Find the best preview image declared in `html`.
///
/// Returns `None` when no pattern matches. A returned value is never empty.
pub fn extract_image_url(html: &str) -> Option<String> {
    PATTERNS.iter().find_map(|pattern| {
        let value = pattern.capture(html)?;
        trace!(pattern = pattern.label, %value, "Matched preview image tag");
        Some(value.to_string())
    })
}
