//! Integration tests for sga-site-crawler
//!
//! Crawl and API tests run against an in-memory site; the HTTP fetch chain is
//! exercised against wiremock servers.

mod api_tests;
mod common;
mod crawl_tests;
mod fetcher_tests;
