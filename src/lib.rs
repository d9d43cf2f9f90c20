//! Spider-Recon: product discovery for e-commerce category pages
//!
//! This crate implements a crawl-and-classify pipeline that renders category
//! listing pages in a headless browser, extracts candidate links, classifies
//! them as product/non-product with URL and DOM heuristics, and escalates
//! ambiguous links to an LLM in batches.

pub mod config;
pub mod crawler;
pub mod output;
pub mod render;
pub mod url;
pub mod validator;

use thiserror::Error;

/// Main error type for Spider-Recon operations
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Validator error: {0}")]
    Validator(#[from] ValidatorError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors from the headless renderer
///
/// A render failure is fatal only to the category being crawled; the
/// coordinator records an empty result for it and keeps going.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation failed for {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("Page load timed out for {url}")]
    Timeout { url: String },

    #[error("Failed to read DOM for {url}: {message}")]
    Dom { url: String, message: String },
}

/// Errors from the remote LLM classification call
///
/// These are recovered by treating the affected batch as non-product
/// (fail-closed); they never abort a crawl.
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("LLM API credential not configured")]
    MissingCredentials,

    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),
}

/// Non-fatal conditions surfaced to the caller alongside crawl results
#[derive(Debug, Clone)]
pub enum CrawlWarning {
    /// A category page could not be rendered; its result is empty.
    RenderFailure { category: String, reason: String },

    /// An entire validation batch failed; every URL in it was treated as
    /// non-product.
    ValidatorFailure { urls: Vec<String>, reason: String },

    /// The LLM response had no usable verdict for one URL; it was treated
    /// as non-product.
    ClassificationParse { url: String, detail: String },
}

impl std::fmt::Display for CrawlWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrawlWarning::RenderFailure { category, reason } => {
                write!(f, "render failed for {}: {}", category, reason)
            }
            CrawlWarning::ValidatorFailure { urls, reason } => {
                write!(
                    f,
                    "validation batch of {} link(s) failed ({}); all treated as non-product",
                    urls.len(),
                    reason
                )
            }
            CrawlWarning::ClassificationParse { url, detail } => {
                write!(f, "no verdict for {} ({}); treated as non-product", url, detail)
            }
        }
    }
}

/// Result type alias for Spider-Recon operations
pub type Result<T> = std::result::Result<T, SpiderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{classify, crawl, extract_candidates, Coordinator, LinkCandidate, Verdict};
pub use output::CrawlResult;
