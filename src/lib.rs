//! sga-site-crawler: a bounded, single-site crawler with query relevance ranking
//!
//! This crate fetches a starting page and optionally walks the site breadth-first,
//! extracting readable content, honoring robots.txt and scoring every page against
//! a free-text query.

pub mod api;
pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Top-level error type for the service and CLI
#[derive(Debug, Error)]
pub enum SiteCrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl rejected: {0}")]
    Crawl(#[from] CrawlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal, whole-request errors raised before any network access
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid start_url: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("Private/localhost targets are not allowed: {host}")]
    ForbiddenHost { host: String },

    #[error("{0}")]
    InvalidParam(String),
}

impl CrawlError {
    /// Stable machine-readable code carried in API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "INVALID_URL",
            Self::ForbiddenHost { .. } => "FORBIDDEN_HOST",
            Self::InvalidParam(_) => "INVALID_PARAM",
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Only http/https URLs are allowed, got: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, SiteCrawlerError>;

// Re-export commonly used types
pub use config::{Config, CrawlOptions, CrawlRequest};
pub use crawler::{crawl_site, scrape_page, Fetcher, HttpFetcher};
pub use output::{CrawlReport, FailureRecord, PageResult};
pub use url::{is_private_host, normalize_url, CrawlScope};
