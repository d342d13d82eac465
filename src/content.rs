//! Markdown-backed content collections.
//!
//! Each collection is a directory of markdown files whose YAML front matter is
//! validated against the collection's record type. Files are picked up the way
//! the site's `**/[^_]*.md` glob does: any depth, `.md` extension, and no
//! leading underscore (drafts and partials start with `_`).
//!
//! ```text
//! content_dir/
//! ├── news/
//! │   ├── 2025/raids.md
//! │   └── _draft.md        # skipped
//! └── columns/
//!     └── on-raids.md
//! ```
//!
//! Entries that fail to read or validate are logged and skipped so one bad
//! file never drops the whole collection.

use serde::de::DeserializeOwned;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

pub const NEWS_COLLECTION: &str = "news";
pub const COLUMNS_COLLECTION: &str = "columns";

/// Whether `path` belongs in a collection.
pub fn is_collection_entry(path: &Path) -> bool {
    let is_markdown = path.extension().is_some_and(|ext| ext == "md");
    let is_partial = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_none_or(|name| name.starts_with('_'));
    is_markdown && !is_partial
}

/// Return the YAML between the opening and closing `---` lines.
///
/// The opening delimiter must be the first line of the file.
pub fn split_front_matter(source: &str) -> Option<&str> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let start = first.len();
    let mut end = start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some(&source[start..end]);
        }
        end += line.len();
    }
    None
}

/// Parse one markdown file's front matter into `T`.
pub fn parse_entry<T: DeserializeOwned>(source: &str) -> Result<T, Box<dyn Error>> {
    let yaml = split_front_matter(source).ok_or("missing front matter")?;
    Ok(serde_yaml::from_str(yaml)?)
}

/// Recursively list collection entries under `base`, sorted by path.
async fn entry_paths(base: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut pending = vec![base.to_path_buf()];
    let mut paths = Vec::new();

    while let Some(dir) = pending.pop() {
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            // Follows symlinks, so linked subdirectories are walked too.
            let is_dir = match fs::metadata(&path).await {
                Ok(meta) => meta.is_dir(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Unreadable entry; skipping");
                    continue;
                }
            };
            if is_dir {
                pending.push(path);
            } else if is_collection_entry(&path) {
                paths.push(path);
            }
        }
    }

    paths.sort();
    Ok(paths)
}

/// Load every valid entry of the collection rooted at `base`.
///
/// A missing directory is an empty collection.
#[instrument(level = "info", skip_all, fields(base = %base.display()))]
pub async fn load_collection<T: DeserializeOwned>(base: &Path) -> Result<Vec<T>, Box<dyn Error>> {
    if !fs::try_exists(base).await? {
        info!("Collection directory does not exist; treating as empty");
        return Ok(Vec::new());
    }

    let paths = entry_paths(base).await?;
    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let source = match fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read entry; skipping");
                continue;
            }
        };
        match parse_entry::<T>(&source) {
            Ok(record) => {
                debug!(path = %path.display(), "Loaded entry");
                records.push(record);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid entry; skipping");
            }
        }
    }

    info!(count = records.len(), "Loaded collection");
    Ok(records)
}

/// Load the named collection from under `content_dir`.
pub async fn load_named<T: DeserializeOwned>(
    content_dir: &str,
    collection: &str,
) -> Result<Vec<T>, Box<dyn Error>> {
    load_collection(&Path::new(content_dir).join(collection)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnItem, NewsItem};

    const NEWS_ENTRY: &str = "---\nnewsHeadline: Police raid Vancouver dispensaries\nnewsSource: Vancouver Sun\nnewsDate: January 28, 2025\nhref: https://vancouversun.com/raids\n---\n\nBody text is ignored.\n";

    #[test]
    fn test_is_collection_entry() {
        assert!(is_collection_entry(Path::new("news/raids.md")));
        assert!(is_collection_entry(Path::new("news/2025/01/raids.md")));
        assert!(!is_collection_entry(Path::new("news/_draft.md")));
        assert!(!is_collection_entry(Path::new("news/raids.mdx")));
        assert!(!is_collection_entry(Path::new("news/raids.txt")));
        assert!(!is_collection_entry(Path::new("news/README")));
    }

    #[test]
    fn test_split_front_matter() {
        let yaml = split_front_matter(NEWS_ENTRY).unwrap();
        assert!(yaml.starts_with("newsHeadline:"));
        assert!(yaml.ends_with("raids\n"));
        assert!(!yaml.contains("---"));
    }

    #[test]
    fn test_split_front_matter_crlf() {
        let source = "---\r\nheadline: A\r\n---\r\nbody";
        assert_eq!(split_front_matter(source), Some("headline: A\r\n"));
    }

    #[test]
    fn test_split_front_matter_missing() {
        assert_eq!(split_front_matter("# Just markdown\n"), None);
        assert_eq!(split_front_matter("---\nunterminated: true\n"), None);
        assert_eq!(split_front_matter(""), None);
    }

    #[test]
    fn test_parse_entry() {
        let news: NewsItem = parse_entry(NEWS_ENTRY).unwrap();
        assert_eq!(news.news_source, "Vancouver Sun");
        assert!(news.needs_image());

        let column: Result<ColumnItem, _> = parse_entry(NEWS_ENTRY);
        assert!(column.is_err());
    }

    #[tokio::test]
    async fn test_load_collection_skips_partials_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let news_dir = dir.path().join(NEWS_COLLECTION);
        std::fs::create_dir_all(news_dir.join("2025")).unwrap();
        std::fs::write(news_dir.join("2025/raids.md"), NEWS_ENTRY).unwrap();
        std::fs::write(news_dir.join("_draft.md"), NEWS_ENTRY).unwrap();
        std::fs::write(news_dir.join("broken.md"), "---\nnewsHeadline: only\n---\n").unwrap();
        std::fs::write(news_dir.join("notes.txt"), NEWS_ENTRY).unwrap();

        let items: Vec<NewsItem> = load_collection(&news_dir).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].href, "https://vancouversun.com/raids");
    }

    #[tokio::test]
    async fn test_load_collection_sorted_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let columns_dir = dir.path().join(COLUMNS_COLLECTION);
        std::fs::create_dir_all(&columns_dir).unwrap();
        for name in ["b", "a", "c"] {
            let body = format!("---\nheadline: {name}\nsource: Staff\ndate: May 1, 2025\nhref: /columns/{name}\n---\n");
            std::fs::write(columns_dir.join(format!("{name}.md")), body).unwrap();
        }

        let columns: Vec<ColumnItem> =
            load_named(dir.path().to_str().unwrap(), COLUMNS_COLLECTION).await.unwrap();
        let headlines: Vec<_> = columns.iter().map(|c| c.headline.as_str()).collect();
        assert_eq!(headlines, ["a", "b", "c"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_load_collection_follows_symlinked_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let shared = dir.path().join("shared");
        std::fs::create_dir_all(&shared).unwrap();
        std::fs::write(shared.join("raids.md"), NEWS_ENTRY).unwrap();

        let news_dir = dir.path().join(NEWS_COLLECTION);
        std::fs::create_dir_all(&news_dir).unwrap();
        std::os::unix::fs::symlink(&shared, news_dir.join("linked")).unwrap();

        std::os::unix::fs::symlink(dir.path().join("gone"), news_dir.join("dangling")).unwrap();

        let items: Vec<NewsItem> = load_collection(&news_dir).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].news_source, "Vancouver Sun");
    }

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let items: Vec<NewsItem> = load_collection(&dir.path().join("nope")).await.unwrap();
        assert!(items.is_empty());
    }
}
