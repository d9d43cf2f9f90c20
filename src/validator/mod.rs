//! LLM batch validation of ambiguous links
//!
//! Links the heuristics could not decide on are grouped into fixed-size
//! batches and submitted to the remote classifier as one numbered prompt
//! per batch. The response is parsed positionally: line N answers link N.
//! Anything that cannot be parsed, and any batch whose call fails outright,
//! resolves to non-product (fail-closed) and is surfaced as a warning
//! rather than an error.

mod llm;

pub use llm::{HttpLlmClient, LlmClient};

use crate::crawler::LinkCandidate;
use crate::CrawlWarning;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolved verdicts for a set of ambiguous candidates
#[derive(Debug, Default)]
pub struct ValidationOutcome {
    /// url -> is-product, covering every submitted candidate
    pub verdicts: HashMap<String, bool>,

    /// Non-fatal problems encountered while resolving the verdicts
    pub warnings: Vec<CrawlWarning>,
}

/// Batches ambiguous candidates through an [`LlmClient`]
pub struct BatchValidator {
    client: Arc<dyn LlmClient>,
    batch_size: usize,
}

impl BatchValidator {
    /// Creates a validator over the given client
    ///
    /// # Arguments
    ///
    /// * `client` - The remote classification capability
    /// * `batch_size` - Candidates submitted per request (minimum 1)
    pub fn new(client: Arc<dyn LlmClient>, batch_size: usize) -> Self {
        Self {
            client,
            batch_size: batch_size.max(1),
        }
    }

    /// Resolves every candidate to a product/non-product verdict
    ///
    /// Each batch is one remote call. A failed call resolves its whole
    /// batch to non-product and records a [`CrawlWarning::ValidatorFailure`];
    /// a response line that yields no verdict resolves that item to
    /// non-product and records a [`CrawlWarning::ClassificationParse`]. The
    /// returned map always covers every submitted candidate.
    pub async fn validate(&self, candidates: &[LinkCandidate]) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::default();

        for batch in candidates.chunks(self.batch_size) {
            let prompt = build_prompt(batch);
            tracing::info!("Submitting validation batch of {} link(s)", batch.len());

            match self.client.complete(&prompt).await {
                Ok(response) => {
                    let verdicts = parse_verdicts(&response, batch.len());
                    for (index, candidate) in batch.iter().enumerate() {
                        let url = candidate.url.as_str().to_string();
                        match verdicts.get(index).copied().flatten() {
                            Some(is_product) => {
                                outcome.verdicts.insert(url, is_product);
                            }
                            None => {
                                outcome.warnings.push(CrawlWarning::ClassificationParse {
                                    url: url.clone(),
                                    detail: format!("no verdict line at position {}", index + 1),
                                });
                                outcome.verdicts.insert(url, false);
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "Validation batch failed: {}; treating {} link(s) as non-product",
                        e,
                        batch.len()
                    );
                    let urls: Vec<String> = batch
                        .iter()
                        .map(|c| c.url.as_str().to_string())
                        .collect();
                    for url in &urls {
                        outcome.verdicts.insert(url.clone(), false);
                    }
                    outcome.warnings.push(CrawlWarning::ValidatorFailure {
                        urls,
                        reason: e.to_string(),
                    });
                }
            }
        }

        outcome
    }
}

/// Builds the numbered classification prompt for one batch
pub fn build_prompt(batch: &[LinkCandidate]) -> String {
    let mut lines = vec![
        "Determine if these links point to product pages. Reply 'YES' or 'NO' for each, one per line:"
            .to_string(),
    ];
    for (index, candidate) in batch.iter().enumerate() {
        lines.push(format!(
            "{}. Link: {} | Context: {}",
            index + 1,
            candidate.url,
            candidate.context
        ));
    }
    lines.join("\n")
}

/// Parses positional YES/NO verdicts out of a completion
///
/// A response line counts as a verdict when it contains YES or NO
/// (case-insensitive, YES checked first); other lines are skipped. The
/// returned vector has exactly `expected` slots; slots with no matching
/// response line are `None`. Verdict lines beyond `expected` are ignored.
pub fn parse_verdicts(response: &str, expected: usize) -> Vec<Option<bool>> {
    let mut verdicts: Vec<Option<bool>> = Vec::with_capacity(expected);
    let mut extra = 0usize;

    for line in response.lines() {
        let upper = line.trim().to_uppercase();
        let verdict = if upper.contains("YES") {
            Some(true)
        } else if upper.contains("NO") {
            Some(false)
        } else {
            None
        };

        if let Some(is_product) = verdict {
            if verdicts.len() < expected {
                verdicts.push(Some(is_product));
            } else {
                extra += 1;
            }
        }
    }

    if extra > 0 {
        tracing::warn!(
            "Ignoring {} verdict line(s) beyond batch size {}",
            extra,
            expected
        );
    }

    verdicts.resize(expected, None);
    verdicts
}
