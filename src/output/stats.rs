//! Plain-text crawl summary
//!
//! Short console rendering of a report, used by the CLI's `summary` format.

use crate::output::report::CrawlReport;

/// Pages listed in the summary
const TOP_PAGES: usize = 10;

/// Formats the console summary of a report
pub fn format_report_summary(report: &CrawlReport) -> String {
    let counters = &report.counters;
    let mut out = String::new();

    out.push_str("=== Site Crawl Summary ===\n\n");
    out.push_str(&format!("Start URL: {}\n", report.start_url));
    if !report.query.is_empty() {
        out.push_str(&format!("Query: {}\n", report.query));
    }
    out.push('\n');

    out.push_str("Overview:\n");
    out.push_str(&format!("  Pages crawled: {}\n", counters.crawled_count));
    out.push_str(&format!("  URLs visited: {}\n", counters.visited_count));
    out.push_str(&format!(
        "  URLs queued: {} (cap {})\n",
        counters.queued_count, report.max_discovered
    ));
    out.push_str(&format!("  Links discovered: {}\n", counters.discovered_links));
    out.push('\n');

    let skipped =
        counters.skipped_by_scope + counters.skipped_by_filter + counters.skipped_by_robots;
    if skipped > 0 || counters.failed_count > 0 {
        out.push_str("Skipped / Failed:\n");
        out.push_str(&format!("  Out of scope: {}\n", counters.skipped_by_scope));
        out.push_str(&format!("  Path filters: {}\n", counters.skipped_by_filter));
        out.push_str(&format!("  robots.txt: {}\n", counters.skipped_by_robots));
        out.push_str(&format!("  Failed: {}\n", counters.failed_count));
        out.push('\n');
    }

    for warning in &report.warnings {
        out.push_str(&format!("Warning: {}\n", warning));
    }

    if !report.pages.is_empty() {
        out.push_str("Top Pages:\n");
        for page in report.pages.iter().take(TOP_PAGES) {
            out.push_str(&format!(
                "  [{:.3}] d{} {} {}\n",
                page.score, page.depth, page.url, page.title
            ));
        }
        if report.pages.len() > TOP_PAGES {
            out.push_str(&format!("  ... and {} more\n", report.pages.len() - TOP_PAGES));
        }
    }

    out
}

/// Prints the console summary of a report to stdout
pub fn print_report_summary(report: &CrawlReport) {
    print!("{}", format_report_summary(report));
}
