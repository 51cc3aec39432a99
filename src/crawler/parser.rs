//! HTML link extraction
//!
//! Collects the crawlable links of a page:
//! - `<a href="...">` anchors only
//! - resolved against the page URL, fragment stripped
//! - restricted to the crawl's site and path filters
//! - deduplicated, first occurrence wins

use crate::url::CrawlScope;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts the in-scope links of a page as absolute URL strings
///
/// # Exclusions
///
/// - empty hrefs and same-page anchors (`#...`)
/// - `javascript:`, `mailto:` and `tel:` links
/// - hrefs that do not resolve, or resolve to a non-HTTP(S) URL
/// - URLs outside `scope` (host or path filters)
///
/// # Example
///
/// ```
/// use sga_site_crawler::crawler::extract_links;
/// use sga_site_crawler::url::CrawlScope;
/// use url::Url;
///
/// let page = Url::parse("https://example.com/docs/").unwrap();
/// let scope = CrawlScope::new(Url::parse("https://example.com/").unwrap(), false, vec![], vec![]);
/// let html = r#"<a href="intro#top">Intro</a><a href="https://other.com/">Elsewhere</a>"#;
/// assert_eq!(extract_links(html, &page, &scope), vec!["https://example.com/docs/intro"]);
/// ```
pub fn extract_links(html: &str, page_url: &Url, scope: &CrawlScope) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut links: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(target) = resolve_link(href, page_url) else {
            continue;
        };
        if !scope.contains(&target) {
            continue;
        }

        let target = target.to_string();
        if seen.insert(target.clone()) {
            links.push(target);
        }
    }

    links
}

/// Resolves an href against the page URL, returning None for skipped links
fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return None;
    }

    let mut target = page_url.join(href).ok()?;
    if target.scheme() != "http" && target.scheme() != "https" {
        return None;
    }
    target.set_fragment(None);
    Some(target)
}
