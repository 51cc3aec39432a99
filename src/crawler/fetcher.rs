//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made on behalf of a crawl:
//! - Building HTTP clients with browser-like headers
//! - An ordered chain of page fetch strategies (first success wins)
//! - robots.txt retrieval with the crawler's own identity
//! - Error classification (status, timeout, empty body, network)
//!
//! The [`Fetcher`] trait is the seam the crawl and the API depend on, so tests
//! can substitute an in-memory site.

use crate::config::FetchConfig;
use crate::url::is_private_host;
use async_trait::async_trait;
use reqwest::{header, redirect::Policy, Client, Response};
use std::time::Duration;
use thiserror::Error;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

/// Redirect hop limit for robots.txt lookups
const ROBOTS_MAX_REDIRECTS: usize = 5;

/// Why a single fetch failed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("empty response body")]
    EmptyBody,

    #[error("{0}")]
    Network(String),

    #[error("all fetch strategies failed: {0}")]
    Exhausted(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl FetchError {
    fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            FetchError::Timeout(timeout)
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

/// Source of page HTML and robots.txt text
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a page body; non-success status and blank bodies are errors
    async fn fetch_html(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;

    /// Fetches robots.txt text presenting `user_agent`
    async fn fetch_robots(
        &self,
        url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<String, FetchError>;
}

/// One way of retrieving a page
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}

/// Builds the shared HTTP client
///
/// # Example
///
/// ```no_run
/// use sga_site_crawler::config::FetchConfig;
/// use sga_site_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default(), 10).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig, max_redirects: usize) -> Result<Client, FetchError> {
    let client = Client::builder()
        .user_agent(config.browser_user_agent.clone())
        .connect_timeout(Duration::from_secs(10))
        .redirect(public_redirects(max_redirects))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()?;
    Ok(client)
}

/// Follows at most `max_redirects` hops and never into a private or loopback host
fn public_redirects(max_redirects: usize) -> Policy {
    Policy::custom(move |attempt| {
        let host = attempt.url().host_str().unwrap_or_default().to_string();
        if is_private_host(&host) {
            attempt.error(format!("redirect to private host {} refused", host))
        } else if attempt.previous().len() > max_redirects {
            attempt.error(format!("too many redirects (limit {})", max_redirects))
        } else {
            attempt.follow()
        }
    })
}

/// A reqwest-backed strategy with its own header set
pub struct ReqwestStrategy {
    name: String,
    client: Client,
    browser_headers: bool,
    accept_language: String,
}

impl ReqwestStrategy {
    /// Full browser header set, follows redirects
    pub fn primary(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            name: "browser".to_string(),
            client: build_http_client(config, 10)?,
            browser_headers: true,
            accept_language: config.accept_language.clone(),
        })
    }

    /// User-Agent only, bounded redirects
    pub fn fallback(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            name: "plain".to_string(),
            client: build_http_client(config, config.fallback_max_redirects)?,
            browser_headers: false,
            accept_language: config.accept_language.clone(),
        })
    }
}

#[async_trait]
impl FetchStrategy for ReqwestStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let mut request = self.client.get(url).timeout(timeout);
        if self.browser_headers {
            request = request
                .header(header::ACCEPT, ACCEPT_HTML)
                .header(header::ACCEPT_LANGUAGE, self.accept_language.as_str())
                .header(header::REFERER, url);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;
        let body = read_success_body(response, timeout).await?;

        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }
        Ok(body)
    }
}

async fn read_success_body(response: Response, timeout: Duration) -> Result<String, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::from_reqwest(e, timeout))
}

/// Production fetcher: tries each strategy in order, first success wins
pub struct HttpFetcher {
    strategies: Vec<Box<dyn FetchStrategy>>,
    robots_client: Client,
}

impl HttpFetcher {
    /// The standard chain: browser headers first, plain request as fallback
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let strategies: Vec<Box<dyn FetchStrategy>> = vec![
            Box::new(ReqwestStrategy::primary(config)?),
            Box::new(ReqwestStrategy::fallback(config)?),
        ];
        Self::with_strategies(config, strategies)
    }

    pub fn with_strategies(
        config: &FetchConfig,
        strategies: Vec<Box<dyn FetchStrategy>>,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            strategies,
            robots_client: build_http_client(config, ROBOTS_MAX_REDIRECTS)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let mut failures = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            match strategy.fetch(url, timeout).await {
                Ok(html) => {
                    tracing::debug!(
                        "Fetched {} via {} ({} bytes)",
                        url,
                        strategy.name(),
                        html.len()
                    );
                    return Ok(html);
                }
                Err(e) => {
                    tracing::warn!("Strategy {} failed for {}: {}", strategy.name(), url, e);
                    failures.push(format!("{}({})", strategy.name(), e));
                }
            }
        }

        Err(FetchError::Exhausted(failures.join("; ")))
    }

    async fn fetch_robots(
        &self,
        url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<String, FetchError> {
        let response = self
            .robots_client
            .get(url)
            .header(header::USER_AGENT, user_agent)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        read_success_body(response, timeout).await
    }
}
