//! Shared test fixtures

use async_trait::async_trait;
use sga_site_crawler::crawler::{FetchError, Fetcher};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// An in-memory site keyed by absolute URL
///
/// Unknown page URLs answer 404, as does a missing robots.txt.
#[derive(Default)]
pub struct StaticSite {
    pages: HashMap<String, String>,
    robots: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
}

impl StaticSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn robots(mut self, origin: &str, body: &str) -> Self {
        self.robots
            .insert(format!("{}/robots.txt", origin), body.to_string());
        self
    }

    /// Page URLs requested so far, in order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

fn not_found() -> FetchError {
    FetchError::Status {
        status: 404,
        reason: "Not Found".to_string(),
    }
}

#[async_trait]
impl Fetcher for StaticSite {
    async fn fetch_html(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(not_found)
    }

    async fn fetch_robots(
        &self,
        url: &str,
        _user_agent: &str,
        _timeout: Duration,
    ) -> Result<String, FetchError> {
        self.robots.get(url).cloned().ok_or_else(not_found)
    }
}

/// A minimal page with a title, one paragraph and the given links
pub fn html_page(title: &str, text: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body><p>{}</p>{}</body></html>",
        title, text, anchors
    )
}
