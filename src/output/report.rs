//! Crawl report types
//!
//! A [`CrawlReport`] echoes the effective crawl parameters, carries the crawl
//! counters, and lists the accepted pages and the (capped) failures. Field
//! names are the JSON wire names.

use crate::config::CrawlOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures kept in a report; later ones are only counted
pub const MAX_REPORTED_FAILURES: usize = 50;

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One accepted page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub url: String,
    pub depth: u32,
    pub title: String,
    pub description: String,
    /// Query relevance, 0 when the query has no tokens
    pub score: f64,
    /// First 1000 characters of the extracted text
    pub content_excerpt: String,
    /// First 1500 characters of the markdown rendering
    pub markdown_excerpt: String,
}

/// A URL that could not be fetched or parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub url: String,
    pub depth: u32,
    pub error: String,
}

/// Crawl counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlCounters {
    /// Accepted pages
    pub crawled_count: usize,
    /// URLs dequeued and processed
    pub visited_count: usize,
    /// URLs ever admitted to the frontier, root included
    pub queued_count: usize,
    /// Candidate links seen on fetched pages, duplicates included
    pub discovered_links: usize,
    pub skipped_by_scope: usize,
    pub skipped_by_filter: usize,
    pub skipped_by_robots: usize,
    /// All failures, including those beyond the reported cap
    pub failed_count: usize,
}

/// Result of one crawl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Normalized root URL
    pub start_url: String,
    pub query: String,
    pub mode_requested: String,
    pub mode_used: String,
    pub max_depth: u32,
    pub max_pages: usize,
    pub max_discovered: usize,
    pub include_paths: Vec<String>,
    pub exclude_paths: Vec<String>,
    pub allow_subdomains: bool,
    pub respect_robots: bool,
    pub request_timeout_ms: u64,
    pub user_agent: String,

    #[serde(flatten)]
    pub counters: CrawlCounters,

    pub warnings: Vec<String>,
    /// Score order when the query produced tokens, visit order otherwise
    pub pages: Vec<PageResult>,
    pub failures: Vec<FailureRecord>,
}

impl CrawlReport {
    /// A report echoing `options` with no results yet
    pub fn new(start_url: impl Into<String>, options: &CrawlOptions, mode_used: &str) -> Self {
        Self {
            start_url: start_url.into(),
            query: options.query.clone(),
            mode_requested: options.mode.clone(),
            mode_used: mode_used.to_string(),
            max_depth: options.max_depth,
            max_pages: options.max_pages,
            max_discovered: options.max_discovered,
            include_paths: options.include_paths.clone(),
            exclude_paths: options.exclude_paths.clone(),
            allow_subdomains: options.allow_subdomains,
            respect_robots: options.respect_robots,
            request_timeout_ms: options.request_timeout_ms(),
            user_agent: options.user_agent.clone(),
            counters: CrawlCounters::default(),
            warnings: Vec::new(),
            pages: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Counts a failure, keeping the record only while under the cap
    pub fn record_failure(&mut self, url: impl Into<String>, depth: u32, error: impl Into<String>) {
        self.counters.failed_count += 1;
        if self.failures.len() < MAX_REPORTED_FAILURES {
            self.failures.push(FailureRecord {
                url: url.into(),
                depth,
                error: error.into(),
            });
        }
    }

    /// Orders pages by score (desc), then depth (asc), then URL (asc)
    pub fn sort_by_relevance(&mut self) {
        self.pages.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.depth.cmp(&b.depth))
                .then_with(|| a.url.cmp(&b.url))
        });
    }
}
