//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop, which:
//! - Validates the root URL before any network access
//! - Drains the frontier in FIFO order until the page budget is spent
//! - Re-checks scope, path filters and robots.txt for every dequeued URL
//! - Fetches, extracts and scores each accepted page
//! - Offers child links to the frontier under the discovery cap
//! - Orders the final report by relevance when the query has tokens

use crate::config::{CrawlOptions, HTTP_MODE};
use crate::crawler::content::{extract_content, truncate_chars};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::{Frontier, FrontierEntry, Offer};
use crate::crawler::parser::extract_links;
use crate::crawler::scorer::{score, tokenize};
use crate::output::{CrawlReport, PageResult};
use crate::robots::RobotsResolver;
use crate::state::CrawlPhase;
use crate::url::{extract_domain, is_private_host, normalize_url, CrawlScope, ScopeDecision};
use crate::CrawlError;
use url::Url;

/// Characters of extracted text kept per page
pub const CONTENT_EXCERPT_CHARS: usize = 1000;

/// Characters of markdown kept per page
pub const MARKDOWN_EXCERPT_CHARS: usize = 1500;

/// Validates a root URL: normalizes it and rejects private or loopback hosts
///
/// Shared by crawls and single-page scrapes; performs no I/O.
pub fn validate_root(raw_url: &str) -> Result<Url, CrawlError> {
    let root = normalize_url(raw_url)?;
    let host = extract_domain(&root).unwrap_or_default();
    if is_private_host(&host) {
        return Err(CrawlError::ForbiddenHost { host });
    }
    Ok(root)
}

/// Main crawl coordinator structure
///
/// One coordinator runs one crawl. It owns the frontier, the robots cache and
/// the report under construction; nothing is shared with other crawls except
/// the fetcher.
pub struct Coordinator<'a> {
    options: &'a CrawlOptions,
    fetcher: &'a dyn Fetcher,
    phase: CrawlPhase,
}

impl<'a> Coordinator<'a> {
    pub fn new(options: &'a CrawlOptions, fetcher: &'a dyn Fetcher) -> Self {
        Self {
            options,
            fetcher,
            phase: CrawlPhase::Validating,
        }
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    fn transition(&mut self, next: CrawlPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal crawl transition {} -> {}",
            self.phase,
            next
        );
        tracing::debug!("Crawl phase {} -> {}", self.phase, next);
        self.phase = next;
    }

    /// Checks the request before any network access
    fn validate(&mut self) -> Result<Url, CrawlError> {
        let result = self.check_options();
        if result.is_err() {
            self.transition(CrawlPhase::Rejected);
        }
        result
    }

    fn check_options(&self) -> Result<Url, CrawlError> {
        if self.options.max_pages == 0 {
            return Err(CrawlError::InvalidParam(
                "max_pages must be at least 1".to_string(),
            ));
        }
        if self.options.max_discovered == 0 {
            return Err(CrawlError::InvalidParam(
                "max_discovered must be at least 1".to_string(),
            ));
        }
        validate_root(&self.options.start_url)
    }

    /// Runs the crawl to completion
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl ran; per-URL failures are inside the report
    /// * `Err(CrawlError)` - The request was rejected before any fetch
    pub async fn run(mut self) -> Result<CrawlReport, CrawlError> {
        let root = self.validate()?;
        self.transition(CrawlPhase::Running);

        let options = self.options;
        let mut report = CrawlReport::new(root.as_str(), options, HTTP_MODE);
        if options.mode != HTTP_MODE {
            tracing::warn!("Rendering mode {} is not available, using http", options.mode);
            report.warnings.push(format!(
                "mode={} is not supported; fell back to http",
                options.mode
            ));
        }

        tracing::info!(
            "Starting crawl of {} (max_depth={}, max_pages={}, max_discovered={})",
            root,
            options.max_depth,
            options.max_pages,
            options.max_discovered
        );

        let tokens = tokenize(&options.query);
        let scope = CrawlScope::from_options(root.clone(), options);
        let mut frontier = Frontier::seeded(root.as_str(), options.max_discovered);
        let mut robots = RobotsResolver::new(self.fetcher, &options.user_agent, options.request_timeout);
        tracing::debug!("robots.txt timeout {}ms", robots.timeout().as_millis());

        while report.pages.len() < options.max_pages {
            let Some(entry) = frontier.next() else {
                break;
            };
            self.visit(entry, &tokens, &scope, &mut frontier, &mut robots, &mut report)
                .await;
        }

        report.counters.crawled_count = report.pages.len();
        report.counters.visited_count = frontier.visited_count();
        report.counters.queued_count = frontier.queued_count();

        if !tokens.is_empty() {
            report.sort_by_relevance();
        }

        self.transition(CrawlPhase::Completed);
        tracing::info!(
            "Crawl of {} finished: {} pages, {} visited, {} failed, robots.txt from {} origins",
            root,
            report.counters.crawled_count,
            report.counters.visited_count,
            report.counters.failed_count,
            robots.cache().len()
        );

        Ok(report)
    }

    /// Processes one dequeued URL
    async fn visit(
        &self,
        entry: FrontierEntry,
        tokens: &[String],
        scope: &CrawlScope,
        frontier: &mut Frontier,
        robots: &mut RobotsResolver<'_>,
        report: &mut CrawlReport,
    ) {
        let FrontierEntry { url, depth } = entry;

        let Ok(page_url) = Url::parse(&url) else {
            report.record_failure(url, depth, "Invalid URL in queue");
            return;
        };

        match scope.check(&page_url) {
            ScopeDecision::Accepted => {}
            ScopeDecision::OutOfScope => {
                tracing::debug!("Skipping {} (out of scope)", url);
                report.counters.skipped_by_scope += 1;
                return;
            }
            ScopeDecision::Filtered => {
                tracing::debug!("Skipping {} (path filters)", url);
                report.counters.skipped_by_filter += 1;
                return;
            }
        }

        if self.options.respect_robots && !robots.is_allowed(&page_url).await {
            tracing::debug!("Skipping {} (robots.txt)", url);
            report.counters.skipped_by_robots += 1;
            return;
        }

        tracing::debug!("Fetching {} (depth {})", url, depth);
        let html = match self
            .fetcher
            .fetch_html(&url, self.options.request_timeout)
            .await
        {
            Ok(html) => html,
            Err(e) => {
                tracing::debug!("Fetch failed for {}: {}", url, e);
                report.record_failure(url, depth, e.to_string());
                return;
            }
        };

        let follow_links = depth < self.options.max_depth;
        let (page, links) = analyze_page(&html, &page_url, depth, tokens, scope, follow_links);
        report.pages.push(page);

        for link in links {
            report.counters.discovered_links += 1;
            match frontier.offer(&link, depth + 1) {
                Offer::Enqueued | Offer::AlreadySeen => {}
                Offer::CapReached => {
                    tracing::debug!(
                        "Discovery cap of {} reached while expanding {}",
                        self.options.max_discovered,
                        url
                    );
                    break;
                }
            }
        }
    }
}

/// Extracts, scores and (optionally) collects links from one page
///
/// Kept synchronous so the parsed document never lives across an await.
fn analyze_page(
    html: &str,
    page_url: &Url,
    depth: u32,
    tokens: &[String],
    scope: &CrawlScope,
    follow_links: bool,
) -> (PageResult, Vec<String>) {
    let extracted = extract_content(html);
    let page = PageResult {
        url: page_url.to_string(),
        depth,
        score: score(tokens, &extracted.title, &extracted.content),
        content_excerpt: truncate_chars(&extracted.content, CONTENT_EXCERPT_CHARS),
        markdown_excerpt: truncate_chars(&extracted.markdown, MARKDOWN_EXCERPT_CHARS),
        title: extracted.title,
        description: extracted.description,
    };

    let links = if follow_links {
        extract_links(html, page_url, scope)
    } else {
        Vec::new()
    };

    (page, links)
}

/// Runs a complete crawl with the given options and fetcher
///
/// # Example
///
/// ```no_run
/// use sga_site_crawler::config::{CrawlOptions, FetchConfig};
/// use sga_site_crawler::crawler::{crawl_site, HttpFetcher};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new(&FetchConfig::default())?;
/// let mut options = CrawlOptions::with_defaults("https://example.com");
/// options.query = "pricing".to_string();
/// let report = crawl_site(&options, &fetcher).await?;
/// println!("{} pages", report.pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl_site(
    options: &CrawlOptions,
    fetcher: &dyn Fetcher,
) -> Result<CrawlReport, CrawlError> {
    Coordinator::new(options, fetcher).run().await
}
