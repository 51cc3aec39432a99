//! Robots.txt handling module
//!
//! This module fetches, parses and caches robots.txt per origin for the
//! duration of one crawl. Robots unavailability never halts a crawl: any
//! failure resolves to allow-all rules.

mod cache;
mod parser;

pub use cache::{CachedRobots, RobotsCache, RobotsSource};
pub use parser::{parse_robots, RobotsRules, FALLBACK_AGENT};

use crate::crawler::Fetcher;
use std::collections::hash_map::Entry;
use std::time::Duration;
use url::Url;

/// Lower bound for the robots.txt fetch timeout
pub const MIN_ROBOTS_TIMEOUT: Duration = Duration::from_millis(3_000);

/// Upper bound for the robots.txt fetch timeout
pub const MAX_ROBOTS_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Resolves robots rules for the origins a crawl visits
pub struct RobotsResolver<'a> {
    fetcher: &'a dyn Fetcher,
    cache: RobotsCache,
    user_agent: String,
    timeout: Duration,
}

impl<'a> RobotsResolver<'a> {
    /// Creates a resolver; the robots timeout is the page timeout clamped to 3-10 seconds
    pub fn new(fetcher: &'a dyn Fetcher, user_agent: impl Into<String>, page_timeout: Duration) -> Self {
        Self {
            fetcher,
            cache: RobotsCache::new(),
            user_agent: user_agent.into(),
            timeout: page_timeout.clamp(MIN_ROBOTS_TIMEOUT, MAX_ROBOTS_TIMEOUT),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn cache(&self) -> &RobotsCache {
        &self.cache
    }

    /// Returns the cached rules for the URL's origin, fetching them on first use
    pub async fn rules_for(&mut self, url: &Url) -> &CachedRobots {
        let origin = url.origin().ascii_serialization();

        match self.cache.entry(origin) {
            Entry::Occupied(cached) => cached.into_mut(),
            Entry::Vacant(slot) => {
                let robots_url = format!("{}/robots.txt", slot.key());
                let entry = match self
                    .fetcher
                    .fetch_robots(&robots_url, &self.user_agent, self.timeout)
                    .await
                {
                    Ok(text) => {
                        let rules = parse_robots(&text, &self.user_agent);
                        tracing::debug!(
                            "Loaded robots.txt for {} ({} allow, {} disallow)",
                            slot.key(),
                            rules.allow.len(),
                            rules.disallow.len()
                        );
                        CachedRobots::fetched(rules)
                    }
                    Err(e) => {
                        tracing::debug!("robots.txt unavailable for {}: {}", slot.key(), e);
                        CachedRobots::fallback()
                    }
                };
                slot.insert(entry)
            }
        }
    }

    /// Checks the URL's path and query against its origin's rules
    pub async fn is_allowed(&mut self, url: &Url) -> bool {
        let path_with_query = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };

        let rules = self.rules_for(url).await;
        let allowed = rules.is_allowed(&path_with_query);
        tracing::trace!(
            "robots decision for {} ({:?} rules): allowed={}",
            url,
            rules.source,
            allowed
        );
        allowed
    }
}
