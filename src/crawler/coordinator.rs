//! Crawl coordinator - multi-category orchestration
//!
//! The coordinator owns the crawl's shared capabilities (one browser, one
//! LLM client), launches one worker task per category URL, and merges each
//! worker's outcome into the result as it completes. Worker failures stay
//! contained: a failed category contributes an empty list and the crawl as
//! a whole still succeeds.

use crate::config::Config;
use crate::crawler::worker::CategoryWorker;
use crate::output::CrawlResult;
use crate::render::{ChromiumRenderer, PageRenderer};
use crate::validator::{BatchValidator, HttpLlmClient};
use crate::SpiderError;
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// Main crawl coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    renderer: Arc<dyn PageRenderer>,
    validator: Arc<BatchValidator>,
}

impl Coordinator {
    /// Creates a coordinator with the real capabilities
    ///
    /// Launches the headless browser and builds the LLM client from the
    /// configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The crawl configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SpiderError)` - Browser launch or client construction failed
    pub async fn new(config: Config) -> Result<Self, SpiderError> {
        let renderer = ChromiumRenderer::launch(&config.renderer).await?;
        let client = HttpLlmClient::new(&config.classifier)?;
        let validator = BatchValidator::new(
            Arc::new(client),
            config.classifier.batch_size as usize,
        );

        Ok(Self::with_capabilities(
            config,
            Arc::new(renderer),
            Arc::new(validator),
        ))
    }

    /// Creates a coordinator over injected capabilities
    ///
    /// Tests substitute a canned renderer and a scripted validator here;
    /// production code goes through [`Coordinator::new`].
    pub fn with_capabilities(
        config: Config,
        renderer: Arc<dyn PageRenderer>,
        validator: Arc<BatchValidator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            renderer,
            validator,
        }
    }

    /// Runs the crawl across all configured categories
    ///
    /// All workers run concurrently; completion order is arbitrary and the
    /// result map is written only from this loop (single writer).
    pub async fn run(&self) -> Result<CrawlResult, SpiderError> {
        tracing::info!(
            "Starting crawl of {} categories",
            self.config.categories.len()
        );

        let mut tasks = JoinSet::new();
        for entry in &self.config.categories {
            let url = Url::parse(&entry.url)?;
            let worker =
                CategoryWorker::new(Arc::clone(&self.renderer), Arc::clone(&self.validator));
            tasks.spawn(async move { worker.run(url).await });
        }

        let mut result = CrawlResult::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    tracing::info!(
                        "Category {} finished: {} product URL(s){}",
                        outcome.category,
                        outcome.products.len(),
                        if outcome.failed { " (render failed)" } else { "" }
                    );
                    result.record(outcome);
                }
                Err(e) => {
                    // A panicked worker contributes nothing; the crawl
                    // itself keeps going.
                    tracing::error!("Category worker task failed: {}", e);
                }
            }
        }

        tracing::info!(
            "Crawl complete: {} product URL(s) across {} categories, {} warning(s)",
            result.total_products(),
            result.categories().len(),
            result.warnings().len()
        );

        Ok(result)
    }
}

/// Runs a complete crawl with the real capabilities
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Per-category product URLs and accumulated warnings
/// * `Err(SpiderError)` - Setup failed before any category was crawled
pub async fn run_crawl(config: Config) -> Result<CrawlResult, SpiderError> {
    let coordinator = Coordinator::new(config).await?;
    coordinator.run().await
}
