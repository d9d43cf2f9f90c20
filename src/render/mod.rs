//! Headless rendering module for Spider-Recon
//!
//! Category pages on modern storefronts assemble most of their product grid
//! client-side, so the crawler renders each page in a real browser and
//! scrolls to the bottom until lazy-loaded content stops arriving. The
//! browser itself sits behind the [`PageRenderer`] trait so tests can
//! substitute canned HTML.

mod chromium;

pub use chromium::ChromiumRenderer;

use crate::RenderError;
use async_trait::async_trait;
use url::Url;

/// Capability contract for turning a URL into fully-materialized HTML
///
/// Implementations drive whatever mechanism loads the page; the pipeline
/// only depends on this trait. A failed render is fatal for the category
/// being crawled and for nothing else.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Loads the page, lets dynamic content settle, and returns the final
    /// DOM serialization.
    async fn render(&self, url: &Url) -> Result<String, RenderError>;
}
