//! Output module for crawl results
//!
//! This module owns the terminal artifact of a crawl: the mapping from
//! category URL to the ordered, duplicate-free product URLs discovered on
//! it, written as JSON, plus a console summary with any warnings that
//! accumulated along the way.

mod json;
pub mod stats;

pub use json::write_results;
pub use stats::print_summary;

use crate::crawler::CategoryOutcome;
use crate::CrawlWarning;
use std::collections::BTreeMap;

/// Merged result of a multi-category crawl
///
/// Owned by the coordinator and mutated only as workers complete; immutable
/// once the crawl finishes. Categories are keyed by their input URL; a
/// failed category is present with an empty list.
#[derive(Debug, Default)]
pub struct CrawlResult {
    categories: BTreeMap<String, Vec<String>>,
    warnings: Vec<CrawlWarning>,
}

impl CrawlResult {
    /// Creates an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one completed category outcome
    pub fn record(&mut self, outcome: CategoryOutcome) {
        self.warnings.extend(outcome.warnings);
        self.categories.insert(outcome.category, outcome.products);
    }

    /// The category -> product-URLs mapping
    pub fn categories(&self) -> &BTreeMap<String, Vec<String>> {
        &self.categories
    }

    /// Product URLs discovered for one category, if it was crawled
    pub fn products(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// All warnings accumulated across categories
    pub fn warnings(&self) -> &[CrawlWarning] {
        &self.warnings
    }

    /// Total product URLs across all categories
    pub fn total_products(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}
