//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching through an ordered strategy chain
//! - Readable content extraction and link extraction
//! - Query tokenization and relevance scoring
//! - The breadth-first frontier and overall crawl coordination
//! - Single-page scraping

mod content;
mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod scorer;
mod scrape;

pub use content::{extract_content, truncate_chars, ExtractedContent, DEFAULT_LANGUAGE};
pub use coordinator::{
    crawl_site, validate_root, Coordinator, CONTENT_EXCERPT_CHARS, MARKDOWN_EXCERPT_CHARS,
};
pub use fetcher::{build_http_client, FetchError, FetchStrategy, Fetcher, HttpFetcher, ReqwestStrategy};
pub use frontier::{Frontier, FrontierEntry, Offer};
pub use parser::extract_links;
pub use scorer::{score, tokenize};
pub use scrape::{scrape_page, ScrapeError, ScrapeMetadata, ScrapeResult};
