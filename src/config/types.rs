use serde::Deserialize;
use std::time::Duration;

/// Browser identity presented by the page fetch strategies
pub const DEFAULT_BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/111.0.0.0 Safari/537.36";

/// Crawler identity used for robots.txt lookups and group selection
pub const DEFAULT_CRAWL_USER_AGENT: &str = "sga-site-crawler/1.0";

pub const DEFAULT_MAX_DEPTH: u32 = 1;
pub const MAX_DEPTH_RANGE: (i64, i64) = (0, 5);

pub const DEFAULT_MAX_PAGES: usize = 20;
pub const MAX_PAGES_RANGE: (i64, i64) = (1, 100);

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;
pub const REQUEST_TIMEOUT_RANGE: (i64, i64) = (3_000, 60_000);

pub const DEFAULT_MAX_DISCOVERED: usize = 400;
pub const MAX_DISCOVERED_RANGE: (i64, i64) = (50, 2_000);

/// The only fetch mode this service implements
pub const HTTP_MODE: &str = "http";

/// Main service configuration, loaded from an optional TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub fetch: FetchConfig,
}

/// HTTP API settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Page fetch behavior shared by every crawl the process runs
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header sent by the page fetch strategies
    #[serde(rename = "browser-user-agent", default = "default_browser_user_agent")]
    pub browser_user_agent: String,

    /// Accept-Language header sent by the primary strategy
    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,

    /// Whether TLS certificate errors are tolerated
    #[serde(rename = "accept-invalid-certs", default = "default_true")]
    pub accept_invalid_certs: bool,

    /// Redirect hop limit for the fallback strategy
    #[serde(rename = "fallback-max-redirects", default = "default_fallback_redirects")]
    pub fallback_max_redirects: usize,

    /// Timeout for single-page scrapes (milliseconds)
    #[serde(rename = "scrape-timeout-ms", default = "default_scrape_timeout_ms")]
    pub scrape_timeout_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            browser_user_agent: default_browser_user_agent(),
            accept_language: default_accept_language(),
            accept_invalid_certs: true,
            fallback_max_redirects: default_fallback_redirects(),
            scrape_timeout_ms: default_scrape_timeout_ms(),
        }
    }
}

impl FetchConfig {
    pub fn scrape_timeout(&self) -> Duration {
        Duration::from_millis(self.scrape_timeout_ms)
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:3002".to_string()
}

fn default_browser_user_agent() -> String {
    DEFAULT_BROWSER_USER_AGENT.to_string()
}

fn default_accept_language() -> String {
    "zh-CN,zh;q=0.9,en;q=0.8".to_string()
}

fn default_true() -> bool {
    true
}

fn default_fallback_redirects() -> usize {
    5
}

fn default_scrape_timeout_ms() -> u64 {
    30_000
}

/// Validated, clamped parameters for a single crawl
///
/// Built only through [`CrawlRequest::into_options`](crate::config::CrawlRequest::into_options),
/// so every bound is already inside its documented range when the crawl starts.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlOptions {
    /// Root URL as supplied (validated by the crawl itself)
    pub start_url: String,

    /// Free-text relevance query (may be empty)
    pub query: String,

    /// Deepest level whose pages are still fetched
    pub max_depth: u32,

    /// Maximum number of accepted pages
    pub max_pages: usize,

    /// Maximum number of URLs ever admitted to the frontier, root included
    pub max_discovered: usize,

    /// Path prefixes a URL must start with (empty = no restriction)
    pub include_paths: Vec<String>,

    /// Path prefixes that always reject a URL
    pub exclude_paths: Vec<String>,

    pub allow_subdomains: bool,

    pub respect_robots: bool,

    /// Rendering mode as requested by the caller
    pub mode: String,

    /// Per-page fetch timeout
    pub request_timeout: Duration,

    /// Crawler identity used for robots.txt
    pub user_agent: String,
}

impl CrawlOptions {
    /// Options for `start_url` with every other field at its default
    pub fn with_defaults(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            query: String::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_pages: DEFAULT_MAX_PAGES,
            max_discovered: DEFAULT_MAX_DISCOVERED,
            include_paths: Vec::new(),
            exclude_paths: Vec::new(),
            allow_subdomains: false,
            respect_robots: true,
            mode: HTTP_MODE.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            user_agent: DEFAULT_CRAWL_USER_AGENT.to_string(),
        }
    }

    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout.as_millis() as u64
    }
}
