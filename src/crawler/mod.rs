//! Crawler module for category-page processing
//!
//! This module contains the core pipeline logic, including:
//! - Link extraction from rendered HTML
//! - Heuristic product/non-product classification
//! - The per-category crawl worker and its phase machine
//! - Multi-category coordination

mod coordinator;
mod extractor;
mod heuristics;
mod worker;

pub use coordinator::{run_crawl, Coordinator};
pub use extractor::{extract_candidates, LinkCandidate};
pub use heuristics::{classify, Verdict};
pub use worker::{CategoryOutcome, CategoryWorker, CrawlPhase};

use crate::config::Config;
use crate::output::CrawlResult;
use crate::SpiderError;

/// Runs a complete crawl operation
///
/// This is the main entry point for crawling. It launches the headless
/// browser, fans one worker out per configured category, resolves ambiguous
/// links through the LLM validator, and returns the merged result.
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Per-category product URLs and accumulated warnings
/// * `Err(SpiderError)` - Setup failed before any category was crawled
pub async fn crawl(config: Config) -> Result<CrawlResult, SpiderError> {
    run_crawl(config).await
}
