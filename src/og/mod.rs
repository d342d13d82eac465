//! Best-effort Open Graph preview image resolution.
//!
//! [`OgImageResolver`] fetches a single third-party page and pulls a preview
//! image URL out of its `<meta>` tags using the ordered matchers in
//! [`patterns`]. Image decoration is cosmetic, so the resolver never returns an
//! error: a transport failure, a timeout, a non-success status, an unreadable
//! body and a page without a usable tag all come back as
//! [`PreviewImage::NotFound`].
//!
//! # Request Shape
//!
//! - One `GET` per call, no retries, no caching
//! - Fixed browser-like `User-Agent`
//! - One deadline covering connect, headers and the full body read

pub mod patterns;

use reqwest::Client;
use std::time::Duration;
use tracing::{instrument, trace};

/// Overall deadline for one page fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Sent with every request; some publishers reject obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Outcome of a single resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewImage {
    /// Image URL exactly as written in the page markup.
    Found(String),
    NotFound,
}

impl PreviewImage {
    pub fn is_found(&self) -> bool {
        matches!(self, PreviewImage::Found(_))
    }

    pub fn into_option(self) -> Option<String> {
        match self {
            PreviewImage::Found(url) => Some(url),
            PreviewImage::NotFound => None,
        }
    }
}

impl From<Option<String>> for PreviewImage {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(url) if !url.is_empty() => PreviewImage::Found(url),
            _ => PreviewImage::NotFound,
        }
    }
}

/// Fetches pages and extracts their preview image.
///
/// Cloning is cheap (the inner HTTP client is reference counted), and a single
/// resolver can serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct OgImageResolver {
    client: Client,
    timeout: Duration,
}

impl OgImageResolver {
    /// Build a resolver with [`DEFAULT_TIMEOUT`] and [`DEFAULT_USER_AGENT`].
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_settings(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Build a resolver with an explicit deadline and user agent.
    pub fn with_settings(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve the preview image for `url`.
    ///
    /// The URL is not validated first; a malformed one simply fails to fetch.
    #[instrument(level = "trace", skip(self))]
    pub async fn resolve(&self, url: &str) -> PreviewImage {
        let body = match self.fetch_body(url).await {
            Ok(body) => body,
            Err(e) => {
                trace!(error = %e, timed_out = e.is_timeout(), "Page fetch failed");
                return PreviewImage::NotFound;
            }
        };

        let found: PreviewImage = patterns::extract_image_url(&body).into();
        if found == PreviewImage::NotFound {
            trace!(bytes = body.len(), "No preview image tag in page");
        }
        found
    }

    async fn fetch_body(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

/// One-shot helper: resolve `url` with default settings.
///
/// Returns `None` for every failure, including a client that cannot be built.
pub async fn fetch_og_image(url: &str) -> Option<String> {
    match OgImageResolver::new() {
        Ok(resolver) => resolver.resolve(url).await.into_option(),
        Err(e) => {
            trace!(error = %e, "Could not build HTTP client");
            None
        }
    }
}
