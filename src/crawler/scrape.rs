//! Single-page scrape
//!
//! Fetches one URL through the same fetch chain as a crawl and returns its
//! extracted content without following any links.

use crate::crawler::content::extract_content;
use crate::crawler::coordinator::validate_root;
use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::CrawlError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Why a scrape failed
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The URL was rejected before any fetch
    #[error(transparent)]
    Rejected(#[from] CrawlError),

    #[error("Failed to fetch page: {0}")]
    Fetch(#[from] FetchError),
}

/// Page metadata returned with a scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeMetadata {
    pub title: String,
    pub description: String,
    pub language: String,
}

/// Extracted content of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub title: String,
    /// Markdown rendering (same as `markdown`)
    pub content: String,
    pub markdown: String,
    /// Plain extracted text
    pub html: String,
    pub metadata: ScrapeMetadata,
    /// Normalized URL that was fetched
    pub url: String,
}

/// Scrapes a single page
///
/// The URL is validated like a crawl root (http/https only, no private hosts)
/// before anything is fetched.
pub async fn scrape_page(
    fetcher: &dyn Fetcher,
    url: &str,
    timeout: Duration,
) -> Result<ScrapeResult, ScrapeError> {
    let target = validate_root(url)?;

    tracing::info!("Scraping {}", target);
    let html = fetcher.fetch_html(target.as_str(), timeout).await?;
    let extracted = extract_content(&html);

    Ok(ScrapeResult {
        metadata: ScrapeMetadata {
            title: extracted.title.clone(),
            description: extracted.description,
            language: extracted.language,
        },
        title: extracted.title,
        content: extracted.markdown.clone(),
        markdown: extracted.markdown,
        html: extracted.content,
        url: target.to_string(),
    })
}
