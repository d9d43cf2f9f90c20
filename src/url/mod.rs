//! URL handling module for Spider-Recon
//!
//! This module provides host extraction, the internal-link test used to keep
//! a crawl on the category's own site, and href resolution for anchors found
//! during extraction.

mod domain;
mod resolve;

// Re-export main functions
pub use domain::{extract_host, is_internal};
pub use resolve::resolve_href;
