//! Output module for crawl reports
//!
//! This module handles:
//! - The report, page and failure types a crawl returns
//! - Rendering reports as markdown documents
//! - Printing console summaries

mod markdown;
mod report;
pub mod stats;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use report::{
    CrawlCounters, CrawlReport, FailureRecord, OutputError, OutputResult, PageResult,
    MAX_REPORTED_FAILURES,
};
pub use stats::{format_report_summary, print_report_summary};
