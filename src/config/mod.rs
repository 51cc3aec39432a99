//! Configuration module for sga-site-crawler
//!
//! Two layers live here:
//! - the service configuration (TOML file, optional) shared by every crawl
//! - the per-crawl request, coerced into clamped [`CrawlOptions`]
//!
//! # Example
//!
//! ```
//! use sga_site_crawler::config::CrawlRequest;
//!
//! let request = CrawlRequest::from_json(serde_json::json!({
//!     "start_url": "https://example.com",
//!     "max_pages": "500",
//! }))
//! .unwrap();
//! let options = request.into_options().unwrap();
//! assert_eq!(options.max_pages, 100);
//! ```

mod parser;
mod request;
mod types;
mod validation;

// Re-export types
pub use request::{coerce_bool, coerce_int, coerce_path_list, CrawlRequest};
pub use types::{
    Config, CrawlOptions, FetchConfig, ServerConfig, DEFAULT_BROWSER_USER_AGENT,
    DEFAULT_CRAWL_USER_AGENT, HTTP_MODE,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate as validate_config;
