use serde::Deserialize;

/// Main configuration structure for Spider-Recon
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub renderer: RendererConfig,
    pub classifier: ClassifierConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryEntry>,
}

/// Headless renderer behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    /// Maximum number of scroll-to-bottom passes per page
    #[serde(rename = "scroll-count", default = "default_scroll_count")]
    pub scroll_count: u32,

    /// Wait between scroll passes, giving lazy-loaded content time to land
    /// (milliseconds)
    #[serde(rename = "scroll-wait-ms", default = "default_scroll_wait_ms")]
    pub scroll_wait_ms: u64,

    /// Wait after the initial navigation before the first scroll
    /// (milliseconds)
    #[serde(rename = "initial-wait-ms", default = "default_initial_wait_ms")]
    pub initial_wait_ms: u64,

    /// Bound on the navigation wait; exceeding it fails the category
    /// (milliseconds)
    #[serde(rename = "page-timeout-ms", default = "default_page_timeout_ms")]
    pub page_timeout_ms: u64,

    /// Number of browser sessions workers may hold at once
    #[serde(rename = "max-sessions", default = "default_max_sessions")]
    pub max_sessions: u32,

    /// Explicit Chromium executable path; autodetected when absent
    #[serde(rename = "chromium-path", default)]
    pub chromium_path: Option<String>,
}

/// LLM fallback classifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Base URL of an OpenAI-compatible chat completions API
    #[serde(rename = "api-base-url")]
    pub api_base_url: String,

    /// Model name passed through to the API
    pub model: String,

    /// Number of ambiguous links submitted per request
    #[serde(rename = "batch-size", default = "default_batch_size")]
    pub batch_size: u32,

    /// Request timeout for one classification call (milliseconds)
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// API credential; the LLM_API_KEY environment variable is used when
    /// this is absent
    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the category -> product-URLs JSON mapping is written to
    #[serde(rename = "results-path")]
    pub results_path: String,
}

/// One category listing page to crawl
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEntry {
    /// Absolute URL of the category page
    pub url: String,
}

fn default_scroll_count() -> u32 {
    10
}

fn default_scroll_wait_ms() -> u64 {
    3000
}

fn default_initial_wait_ms() -> u64 {
    3000
}

fn default_page_timeout_ms() -> u64 {
    30_000
}

fn default_max_sessions() -> u32 {
    4
}

fn default_batch_size() -> u32 {
    10
}

fn default_request_timeout_ms() -> u64 {
    30_000
}
