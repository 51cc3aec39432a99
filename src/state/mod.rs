//! State module for tracking crawl progress
//!
//! A crawl moves `Validating -> Running -> Completed`, or stops at `Rejected`
//! when its inputs fail validation before any network access.

mod crawl_phase;

pub use crawl_phase::CrawlPhase;
