//! URL handling module for sga-site-crawler
//!
//! This module provides URL normalization, SSRF host screening, and the
//! domain/path scope checks every crawl applies to candidate URLs.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, is_private_host};
pub use matcher::{in_scope, matches_path_filters};
pub use normalize::normalize_url;

use crate::config::CrawlOptions;
use url::Url;

/// Outcome of checking one URL against a crawl's scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeDecision {
    /// Same site and passes the path filters
    Accepted,
    /// Host is outside the crawl's site
    OutOfScope,
    /// Same site but rejected by include/exclude prefixes
    Filtered,
}

impl ScopeDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Site boundary for one crawl: root host plus path filters
#[derive(Debug, Clone)]
pub struct CrawlScope {
    root: Url,
    allow_subdomains: bool,
    include_paths: Vec<String>,
    exclude_paths: Vec<String>,
}

impl CrawlScope {
    pub fn new(
        root: Url,
        allow_subdomains: bool,
        include_paths: Vec<String>,
        exclude_paths: Vec<String>,
    ) -> Self {
        Self {
            root,
            allow_subdomains,
            include_paths,
            exclude_paths,
        }
    }

    /// Scope for a validated root using the crawl's filter settings
    pub fn from_options(root: Url, options: &CrawlOptions) -> Self {
        Self::new(
            root,
            options.allow_subdomains,
            options.include_paths.clone(),
            options.exclude_paths.clone(),
        )
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Classifies a URL; host scope is checked before the path filters
    pub fn check(&self, url: &Url) -> ScopeDecision {
        if !in_scope(url, &self.root, self.allow_subdomains) {
            ScopeDecision::OutOfScope
        } else if !matches_path_filters(url, &self.include_paths, &self.exclude_paths) {
            ScopeDecision::Filtered
        } else {
            ScopeDecision::Accepted
        }
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.check(url).is_accepted()
    }
}
