//! Per-category crawl worker
//!
//! One worker owns one category page end-to-end: render, extract, classify,
//! validate, deduplicate. Workers never share state with each other; the
//! visited set and the phase machine below are both scoped to a single
//! category crawl.

use crate::crawler::extractor::extract_candidates;
use crate::crawler::heuristics::{classify, Verdict};
use crate::render::PageRenderer;
use crate::url::{extract_host, is_internal};
use crate::validator::BatchValidator;
use crate::CrawlWarning;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Processing phase of one category crawl
///
/// Phases run strictly in order; `Validating` is skipped when no candidate
/// is ambiguous, and `Failed` is reachable from `Rendering` only: a render
/// failure is the single unrecoverable step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Pending,
    Rendering,
    Extracting,
    Classifying,
    Validating,
    Done,
    Failed,
}

impl CrawlPhase {
    /// Whether `next` is a legal successor of this phase
    pub fn can_transition(self, next: CrawlPhase) -> bool {
        use CrawlPhase::*;
        matches!(
            (self, next),
            (Pending, Rendering)
                | (Rendering, Extracting)
                | (Rendering, Failed)
                | (Extracting, Classifying)
                | (Classifying, Validating)
                | (Classifying, Done)
                | (Validating, Done)
        )
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CrawlPhase::Pending => "pending",
            CrawlPhase::Rendering => "rendering",
            CrawlPhase::Extracting => "extracting",
            CrawlPhase::Classifying => "classifying",
            CrawlPhase::Validating => "validating",
            CrawlPhase::Done => "done",
            CrawlPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Completed result of one category crawl
#[derive(Debug)]
pub struct CategoryOutcome {
    /// The category URL this outcome belongs to
    pub category: String,

    /// Distinct product URLs in discovery order
    pub products: Vec<String>,

    /// Non-fatal problems encountered along the way
    pub warnings: Vec<CrawlWarning>,

    /// Whether the category failed outright (render failure)
    pub failed: bool,
}

/// Crawls one category page end-to-end
pub struct CategoryWorker {
    renderer: Arc<dyn PageRenderer>,
    validator: Arc<BatchValidator>,
    phase: CrawlPhase,
}

impl CategoryWorker {
    /// Creates a worker over the shared renderer and validator
    pub fn new(renderer: Arc<dyn PageRenderer>, validator: Arc<BatchValidator>) -> Self {
        Self {
            renderer,
            validator,
            phase: CrawlPhase::Pending,
        }
    }

    /// The worker's current phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    fn advance(&mut self, next: CrawlPhase, category: &str) {
        debug_assert!(
            self.phase.can_transition(next),
            "illegal phase transition {} -> {}",
            self.phase,
            next
        );
        tracing::debug!("{}: {} -> {}", category, self.phase, next);
        self.phase = next;
    }

    /// Runs the category crawl to completion
    ///
    /// Only the render step can fail the category; everything after it
    /// degrades to warnings. The returned product list is deduplicated
    /// through the worker's visited set and ordered by discovery.
    pub async fn run(mut self, category_url: Url) -> CategoryOutcome {
        let category = category_url.as_str().to_string();
        let mut warnings = Vec::new();

        self.advance(CrawlPhase::Rendering, &category);
        let html = match self.renderer.render(&category_url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Render failed for {}: {}", category, e);
                self.advance(CrawlPhase::Failed, &category);
                warnings.push(CrawlWarning::RenderFailure {
                    category: category.clone(),
                    reason: e.to_string(),
                });
                return CategoryOutcome {
                    category,
                    products: Vec::new(),
                    warnings,
                    failed: true,
                };
            }
        };

        self.advance(CrawlPhase::Extracting, &category);
        let mut candidates = extract_candidates(&html, &category_url);

        // Stay on the category's own site (subdomains included)
        if let Some(base_host) = extract_host(&category_url) {
            let before = candidates.len();
            candidates.retain(|c| is_internal(&c.url, &base_host));
            tracing::debug!(
                "{}: {} candidate(s), {} internal",
                category,
                before,
                candidates.len()
            );
        }

        self.advance(CrawlPhase::Classifying, &category);
        let mut heuristic_products = Vec::new();
        let mut ambiguous = Vec::new();
        let mut rejected = 0usize;
        for candidate in candidates {
            match classify(&candidate) {
                Verdict::Product => heuristic_products.push(candidate),
                Verdict::Ambiguous => ambiguous.push(candidate),
                Verdict::NotProduct => rejected += 1,
            }
        }
        tracing::info!(
            "{}: {} product, {} ambiguous, {} rejected by heuristics",
            category,
            heuristic_products.len(),
            ambiguous.len(),
            rejected
        );

        let confirmed: Vec<String> = if ambiguous.is_empty() {
            Vec::new()
        } else {
            self.advance(CrawlPhase::Validating, &category);
            let outcome = self.validator.validate(&ambiguous).await;
            warnings.extend(outcome.warnings);
            ambiguous
                .iter()
                .filter(|c| {
                    outcome
                        .verdicts
                        .get(c.url.as_str())
                        .copied()
                        .unwrap_or(false)
                })
                .map(|c| c.url.as_str().to_string())
                .collect()
        };

        // Merge heuristic and LLM-confirmed products through the visited
        // set; insertion order is the emitted order.
        let mut visited = HashSet::new();
        let mut products = Vec::new();
        for url in heuristic_products
            .iter()
            .map(|c| c.url.as_str().to_string())
            .chain(confirmed)
        {
            if visited.insert(url.clone()) {
                products.push(url);
            }
        }

        self.advance(CrawlPhase::Done, &category);

        CategoryOutcome {
            category,
            products,
            warnings,
            failed: false,
        }
    }
}
