//! End-to-end crawl tests against an in-memory site

use crate::common::{html_page, StaticSite};
use sga_site_crawler::config::{CrawlOptions, CrawlRequest};
use sga_site_crawler::crawl_site;
use serde_json::json;

const ROOT: &str = "https://example.com/";

fn options(max_depth: u32) -> CrawlOptions {
    let mut options = CrawlOptions::with_defaults(ROOT);
    options.max_depth = max_depth;
    options
}

fn urls(report: &sga_site_crawler::CrawlReport) -> Vec<&str> {
    report.pages.iter().map(|p| p.url.as_str()).collect()
}

#[tokio::test]
async fn test_depth_zero_fetches_only_root() {
    let site = StaticSite::new().page(
        ROOT,
        &html_page("Home", "Welcome", &["/about", "/contact"]),
    );

    let report = crawl_site(&options(0), &site).await.unwrap();

    assert_eq!(urls(&report), vec![ROOT]);
    assert_eq!(site.fetched(), vec![ROOT.to_string()]);
    assert_eq!(report.counters.discovered_links, 0);
    assert_eq!(report.counters.crawled_count, 1);
    assert_eq!(report.counters.visited_count, 1);
    assert_eq!(report.counters.queued_count, 1);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_localhost_rejected_without_fetching() {
    let site = StaticSite::new();
    let options = CrawlOptions::with_defaults("http://localhost/");

    let err = crawl_site(&options, &site).await.unwrap_err();

    assert_eq!(err.error_code(), "FORBIDDEN_HOST");
    assert!(site.fetched().is_empty());
}

#[tokio::test]
async fn test_non_http_scheme_rejected() {
    let site = StaticSite::new();
    let options = CrawlOptions::with_defaults("ftp://example.com/");

    let err = crawl_site(&options, &site).await.unwrap_err();
    assert_eq!(err.error_code(), "INVALID_URL");
}

#[tokio::test]
async fn test_breadth_first_order() {
    let site = StaticSite::new()
        .page(ROOT, &html_page("Home", "Root", &["/a", "/b"]))
        .page("https://example.com/a", &html_page("A", "Page A", &["/a1"]))
        .page("https://example.com/b", &html_page("B", "Page B", &["/b1"]))
        .page("https://example.com/a1", &html_page("A1", "Deep A", &[]))
        .page("https://example.com/b1", &html_page("B1", "Deep B", &[]));

    let report = crawl_site(&options(2), &site).await.unwrap();

    assert_eq!(
        urls(&report),
        vec![
            ROOT,
            "https://example.com/a",
            "https://example.com/b",
            "https://example.com/a1",
            "https://example.com/b1",
        ]
    );
    let depths: Vec<u32> = report.pages.iter().map(|p| p.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 2, 2]);
    assert!(report.pages.iter().all(|p| p.score == 0.0));
}

#[tokio::test]
async fn test_links_found_at_max_depth_not_followed() {
    let site = StaticSite::new()
        .page(ROOT, &html_page("Home", "Root", &["/a"]))
        .page("https://example.com/a", &html_page("A", "Page A", &["/deeper"]));

    let report = crawl_site(&options(1), &site).await.unwrap();

    assert_eq!(urls(&report), vec![ROOT, "https://example.com/a"]);
    assert_eq!(report.counters.discovered_links, 1);
    assert!(!site
        .fetched()
        .contains(&"https://example.com/deeper".to_string()));
}

#[tokio::test]
async fn test_robots_disallow_skips_pages() {
    let site = StaticSite::new()
        .robots("https://example.com", "User-agent: *\nDisallow: /private\n")
        .page(ROOT, &html_page("Home", "Root", &["/private/report", "/public"]))
        .page("https://example.com/private/report", &html_page("Secret", "Hidden", &[]))
        .page("https://example.com/public", &html_page("Public", "Open", &[]));

    let report = crawl_site(&options(1), &site).await.unwrap();

    assert_eq!(urls(&report), vec![ROOT, "https://example.com/public"]);
    assert_eq!(report.counters.skipped_by_robots, 1);
    assert_eq!(report.counters.visited_count, 3);
    assert!(!site
        .fetched()
        .contains(&"https://example.com/private/report".to_string()));
}

#[tokio::test]
async fn test_robots_ignored_when_not_respected() {
    let site = StaticSite::new()
        .robots("https://example.com", "User-agent: *\nDisallow: /\n")
        .page(ROOT, &html_page("Home", "Root", &[]));

    let mut options = options(0);
    options.respect_robots = false;
    let report = crawl_site(&options, &site).await.unwrap();
    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.counters.skipped_by_robots, 0);

    options.respect_robots = true;
    let report = crawl_site(&options, &site).await.unwrap();
    assert!(report.pages.is_empty());
    assert_eq!(report.counters.skipped_by_robots, 1);
}

#[tokio::test]
async fn test_discovery_cap_stops_enqueueing() {
    let children = ["/p1", "/p2", "/p3", "/p4", "/p5"];
    let mut site = StaticSite::new().page(ROOT, &html_page("Home", "Root", &children));
    for child in children {
        site = site.page(
            &format!("https://example.com{}", child),
            &html_page(child, "Child", &[]),
        );
    }

    let mut options = options(1);
    options.max_discovered = 3;
    let report = crawl_site(&options, &site).await.unwrap();

    assert_eq!(report.counters.queued_count, 3);
    assert_eq!(report.counters.discovered_links, 3);
    assert_eq!(
        urls(&report),
        vec![ROOT, "https://example.com/p1", "https://example.com/p2"]
    );
}

#[tokio::test]
async fn test_page_budget_bounds_crawl() {
    let children = ["/p1", "/p2", "/p3", "/p4", "/p5"];
    let mut site = StaticSite::new().page(ROOT, &html_page("Home", "Root", &children));
    for child in children {
        site = site.page(
            &format!("https://example.com{}", child),
            &html_page(child, "Child", &[]),
        );
    }

    let mut options = options(1);
    options.max_pages = 2;
    let report = crawl_site(&options, &site).await.unwrap();

    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.counters.crawled_count, 2);
    assert_eq!(report.counters.visited_count, 2);
    assert_eq!(report.counters.queued_count, 6);
}

#[tokio::test]
async fn test_page_budget_counts_only_accepted_pages() {
    let site = StaticSite::new()
        .robots("https://example.com", "User-agent: *\nDisallow: /blocked\n")
        .page(ROOT, &html_page("Home", "Root", &["/blocked", "/missing", "/third", "/fourth"]))
        .page("https://example.com/blocked", &html_page("Blocked", "Hidden", &[]))
        .page("https://example.com/third", &html_page("Third", "Reached", &[]))
        .page("https://example.com/fourth", &html_page("Fourth", "Unreached", &[]));

    let mut options = options(1);
    options.max_pages = 2;
    let report = crawl_site(&options, &site).await.unwrap();

    assert_eq!(urls(&report), vec![ROOT, "https://example.com/third"]);
    assert_eq!(report.counters.skipped_by_robots, 1);
    assert_eq!(report.counters.failed_count, 1);
    assert_eq!(report.counters.visited_count, 4);
    assert!(!site
        .fetched()
        .contains(&"https://example.com/fourth".to_string()));
}

#[tokio::test]
async fn test_failures_recorded_and_crawl_continues() {
    let site = StaticSite::new()
        .page(ROOT, &html_page("Home", "Root", &["/missing", "/ok"]))
        .page("https://example.com/ok", &html_page("Ok", "Fine", &[]));

    let report = crawl_site(&options(1), &site).await.unwrap();

    assert_eq!(urls(&report), vec![ROOT, "https://example.com/ok"]);
    assert_eq!(report.counters.failed_count, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].url, "https://example.com/missing");
    assert_eq!(report.failures[0].depth, 1);
    assert_eq!(report.failures[0].error, "HTTP 404: Not Found");
}

#[tokio::test]
async fn test_pages_ranked_by_query() {
    let site = StaticSite::new()
        .page(ROOT, &html_page("Home", "Welcome aboard", &["/guide", "/misc"]))
        .page(
            "https://example.com/guide",
            &html_page("Rust Guide", "Learning rust step by step", &[]),
        )
        .page("https://example.com/misc", &html_page("Misc", "Other notes", &[]));

    let mut options = options(1);
    options.query = "Rust".to_string();
    let report = crawl_site(&options, &site).await.unwrap();

    assert_eq!(report.pages.len(), 3);
    assert_eq!(report.pages[0].url, "https://example.com/guide");
    assert!(report.pages[0].score > report.pages[1].score);
    // Zero-score ties fall back to depth, then URL
    assert_eq!(report.pages[1].url, ROOT);
    assert_eq!(report.pages[2].url, "https://example.com/misc");
}

#[tokio::test]
async fn test_off_site_and_filtered_links_not_followed() {
    let site = StaticSite::new()
        .page(
            "https://example.com/docs/",
            &html_page(
                "Docs",
                "Index",
                &["/docs/intro", "/blog/post", "https://other.com/docs/x"],
            ),
        )
        .page("https://example.com/docs/intro", &html_page("Intro", "Start", &[]));

    let mut options = CrawlOptions::with_defaults("https://example.com/docs/");
    options.include_paths = vec!["/docs".to_string()];
    let report = crawl_site(&options, &site).await.unwrap();

    assert_eq!(
        urls(&report),
        vec!["https://example.com/docs/", "https://example.com/docs/intro"]
    );
    assert_eq!(report.counters.discovered_links, 1);
    assert!(!site
        .fetched()
        .iter()
        .any(|u| u.contains("/blog/") || u.contains("other.com")));
}

#[tokio::test]
async fn test_root_outside_include_filter() {
    let site = StaticSite::new().page(ROOT, &html_page("Home", "Root", &["/docs/a"]));

    let mut options = options(1);
    options.include_paths = vec!["/docs".to_string()];
    let report = crawl_site(&options, &site).await.unwrap();

    assert!(report.pages.is_empty());
    assert_eq!(report.counters.skipped_by_filter, 1);
    assert!(site.fetched().is_empty());
}

#[tokio::test]
async fn test_request_coercion_feeds_crawl() {
    let site = StaticSite::new().page(ROOT, &html_page("Home", "Root", &["/a"]));

    let options = CrawlRequest::from_json(json!({
        "start_url": "  https://example.com#top ",
        "max_depth": "0",
        "respect_robots": "no",
        "mode": "browser",
    }))
    .unwrap()
    .into_options()
    .unwrap();
    let report = crawl_site(&options, &site).await.unwrap();

    assert_eq!(report.start_url, ROOT);
    assert_eq!(report.max_depth, 0);
    assert!(!report.respect_robots);
    assert_eq!(report.mode_used, "http");
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.pages.len(), 1);
}
