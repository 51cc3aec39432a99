//! Markdown report generation
//!
//! Renders a crawl report as a human-readable markdown document: parameters,
//! counters, ranked pages and failures.

use crate::output::report::{CrawlReport, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Longest excerpt shown per page in the markdown report
const EXCERPT_PREVIEW_CHARS: usize = 300;

/// Writes the markdown rendering of `report` to `output_path`
pub fn write_markdown_report(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_report(report: &CrawlReport) -> String {
    let mut md = String::new();

    md.push_str("# Site Crawl Report\n\n");

    // Parameters
    md.push_str("## Parameters\n\n");
    md.push_str(&format!("- **Start URL**: {}\n", report.start_url));
    if !report.query.is_empty() {
        md.push_str(&format!("- **Query**: {}\n", report.query));
    }
    md.push_str(&format!(
        "- **Mode**: {} (requested: {})\n",
        report.mode_used, report.mode_requested
    ));
    md.push_str(&format!("- **Max Depth**: {}\n", report.max_depth));
    md.push_str(&format!("- **Max Pages**: {}\n", report.max_pages));
    md.push_str(&format!("- **Max Discovered**: {}\n", report.max_discovered));
    if !report.include_paths.is_empty() {
        md.push_str(&format!(
            "- **Include Paths**: {}\n",
            report.include_paths.join(", ")
        ));
    }
    if !report.exclude_paths.is_empty() {
        md.push_str(&format!(
            "- **Exclude Paths**: {}\n",
            report.exclude_paths.join(", ")
        ));
    }
    md.push_str(&format!(
        "- **Allow Subdomains**: {}\n",
        report.allow_subdomains
    ));
    md.push_str(&format!("- **Respect Robots**: {}\n", report.respect_robots));
    md.push_str(&format!(
        "- **Request Timeout**: {} ms\n\n",
        report.request_timeout_ms
    ));

    // Counters
    let counters = &report.counters;
    md.push_str("## Counters\n\n");
    md.push_str("| Counter | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Crawled | {} |\n", counters.crawled_count));
    md.push_str(&format!("| Visited | {} |\n", counters.visited_count));
    md.push_str(&format!("| Queued | {} |\n", counters.queued_count));
    md.push_str(&format!(
        "| Discovered Links | {} |\n",
        counters.discovered_links
    ));
    md.push_str(&format!(
        "| Skipped (scope) | {} |\n",
        counters.skipped_by_scope
    ));
    md.push_str(&format!(
        "| Skipped (filter) | {} |\n",
        counters.skipped_by_filter
    ));
    md.push_str(&format!(
        "| Skipped (robots) | {} |\n",
        counters.skipped_by_robots
    ));
    md.push_str(&format!("| Failed | {} |\n\n", counters.failed_count));

    if !report.warnings.is_empty() {
        md.push_str("## Warnings\n\n");
        for warning in &report.warnings {
            md.push_str(&format!("- {}\n", warning));
        }
        md.push('\n');
    }

    // Pages
    md.push_str("## Pages\n\n");
    if report.pages.is_empty() {
        md.push_str("No pages were crawled.\n\n");
    }
    for (rank, page) in report.pages.iter().enumerate() {
        let title = if page.title.is_empty() {
            page.url.as_str()
        } else {
            page.title.as_str()
        };
        md.push_str(&format!("### {}. {}\n\n", rank + 1, title));
        md.push_str(&format!("- **URL**: {}\n", page.url));
        md.push_str(&format!("- **Depth**: {}\n", page.depth));
        md.push_str(&format!("- **Score**: {:.3}\n", page.score));
        if !page.description.is_empty() {
            md.push_str(&format!("- **Description**: {}\n", page.description));
        }
        md.push('\n');

        let preview = crate::crawler::truncate_chars(&page.content_excerpt, EXCERPT_PREVIEW_CHARS);
        if !preview.is_empty() {
            md.push_str(&format!("> {}\n\n", preview));
        }
    }

    // Failures
    if !report.failures.is_empty() {
        md.push_str("## Failures\n\n");
        md.push_str("| URL | Depth | Error |\n");
        md.push_str("|-----|-------|-------|\n");
        for failure in &report.failures {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                failure.url,
                failure.depth,
                failure.error.replace('|', "\\|")
            ));
        }
        if counters.failed_count > report.failures.len() {
            md.push_str(&format!(
                "\n... and {} more\n",
                counters.failed_count - report.failures.len()
            ));
        }
        md.push('\n');
    }

    md
}
