//! Heuristic link classification
//!
//! A pure, total decision function over one [`LinkCandidate`]. Rules are
//! evaluated in order and the first match wins; anything no rule covers is
//! Ambiguous and goes to the LLM fallback.

use crate::crawler::extractor::LinkCandidate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Classification outcome for one link candidate
///
/// Ambiguous values are later resolved to Product/NotProduct by the LLM
/// stage; no further states exist after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The link points to a product detail page
    Product,
    /// The link points anywhere else (navigation, account, assets, ...)
    NotProduct,
    /// The heuristics could not decide
    Ambiguous,
}

/// Product detail paths: /product/, /products/, /p/
static PRODUCT_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/(?:products?|p)/").unwrap());

/// SKU-like trailing segment: last path segment carries a run of 4+ digits
static SKU_SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/[a-z0-9-]*\d{4,}[a-z0-9]*(?:\.html?)?/?$").unwrap());

/// Currency amount nearby: symbol-prefixed or code-suffixed
static PRICE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[$€£]\s?\d+(?:[.,]\d{1,2})?)|(?:\d+(?:[.,]\d{1,2})?\s?(?:USD|EUR|GBP))")
        .unwrap()
});

/// Add-to-cart style phrases
static ADD_TO_CART_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\badd\s+to\s+(?:cart|bag|basket)\b|\bbuy\s+now\b").unwrap()
});

/// Site chrome and listing paths that are never product detail pages
static NON_PRODUCT_PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)/(?:cart|checkout|login|log-?in|sign-?in|sign-?up|register|account|wishlist|compare|category|categories|collections?|search|help|faq|support|about|contact|blog|news|careers|privacy|terms|returns|shipping)(?:/|$)",
    )
    .unwrap()
});

/// Static asset extensions
static ASSET_EXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.(?:css|js|json|png|jpe?g|gif|svg|webp|ico|pdf|zip|gz|xml|txt|woff2?)$")
        .unwrap()
});

/// Classifies one link candidate
///
/// Decision policy, first match wins:
/// 1. URL path matches a known product-path pattern or ends in a SKU-like
///    segment -> Product
/// 2. The anchor or an ancestor carries a product-tile class/id token ->
///    Product
/// 3. The context window contains a price AND an add-to-cart phrase ->
///    Product
/// 4. URL path matches a known non-product pattern or a static-asset
///    extension -> NotProduct
/// 5. Otherwise -> Ambiguous
///
/// Total and deterministic: the same candidate always yields the same
/// verdict and no input fails.
pub fn classify(candidate: &LinkCandidate) -> Verdict {
    let path = candidate.url.path();

    if PRODUCT_PATH_RE.is_match(path) || SKU_SEGMENT_RE.is_match(path) {
        return Verdict::Product;
    }

    if candidate
        .class_tokens
        .iter()
        .any(|token| is_product_tile_token(token))
    {
        return Verdict::Product;
    }

    if PRICE_RE.is_match(&candidate.context) && ADD_TO_CART_RE.is_match(&candidate.context) {
        return Verdict::Product;
    }

    if NON_PRODUCT_PATH_RE.is_match(path) || ASSET_EXT_RE.is_match(path) {
        return Verdict::NotProduct;
    }

    Verdict::Ambiguous
}

/// Known product-tile vocabulary for class/id tokens
fn is_product_tile_token(token: &str) -> bool {
    token.contains("product") || token.contains("item-card") || token.contains("item-tile")
}
