//! Per-crawl robots.txt cache
//!
//! Each crawl owns one cache, keyed by origin. An origin is fetched at most
//! once per crawl; failures are cached as allow-all so they are not retried.

use crate::robots::RobotsRules;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Where a cached rule set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotsSource {
    /// robots.txt was fetched and parsed
    Fetched,
    /// Fetch failed; the entry allows everything
    Fallback,
}

/// Cached robots.txt rules for one origin
#[derive(Debug, Clone)]
pub struct CachedRobots {
    pub rules: RobotsRules,
    pub source: RobotsSource,
}

impl CachedRobots {
    pub fn fetched(rules: RobotsRules) -> Self {
        Self {
            rules,
            source: RobotsSource::Fetched,
        }
    }

    pub fn fallback() -> Self {
        Self {
            rules: RobotsRules::allow_all(),
            source: RobotsSource::Fallback,
        }
    }

    pub fn is_allowed(&self, path_with_query: &str) -> bool {
        self.rules.is_allowed(path_with_query)
    }
}

/// Origin-keyed rule cache
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: HashMap<String, CachedRobots>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&mut self, origin: String) -> Entry<'_, String, CachedRobots> {
        self.entries.entry(origin)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
