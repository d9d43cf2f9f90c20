//! Link extraction from rendered category pages
//!
//! This module turns a rendered HTML document into an ordered, deduplicated
//! list of anchor candidates. Each candidate carries enough DOM context
//! (anchor text, a bounded text window, class/id tokens) for the heuristic
//! classifier and the LLM prompt downstream.

use crate::url::resolve_href;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Characters of surrounding text captured per anchor
const CONTEXT_WINDOW: usize = 200;

/// Ancestor elements inspected for class/id tokens
const ANCESTOR_DEPTH: usize = 3;

/// One anchor found on a category page, with its DOM context
///
/// Candidates are created during extraction, read-only afterward, and
/// discarded once classified.
#[derive(Debug, Clone)]
pub struct LinkCandidate {
    /// Absolute, fragment-free URL the anchor resolves to
    pub url: Url,

    /// Whitespace-collapsed anchor text
    pub anchor_text: String,

    /// Bounded text window from the anchor's nearest ancestor element
    pub context: String,

    /// Lowercase class and id tokens from the anchor and its nearest
    /// ancestors
    pub class_tokens: HashSet<String>,
}

/// Extracts link candidates from rendered HTML
///
/// Walks every `<a href>` in document order, resolves the href against the
/// page URL, and captures the surrounding context. No two returned
/// candidates share a resolved URL; the first occurrence wins.
///
/// Excluded anchors: missing/empty hrefs, `javascript:`/`mailto:`/`tel:`/
/// `data:` schemes, fragment-only links, anchors carrying the `download`
/// attribute, and anything that does not resolve to http(s).
///
/// # Arguments
///
/// * `html` - The rendered HTML content
/// * `base_url` - The category page URL for resolving relative hrefs
///
/// # Returns
///
/// Candidates in document order, deduplicated by resolved URL
pub fn extract_candidates(html: &str, base_url: &Url) -> Vec<LinkCandidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();
    let mut seen = HashSet::new();

    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            // Skip explicit file downloads
            if element.value().attr("download").is_some() {
                continue;
            }

            let href = match element.value().attr("href") {
                Some(h) => h,
                None => continue,
            };

            let url = match resolve_href(href, base_url) {
                Some(u) => u,
                None => continue,
            };

            // First occurrence wins
            if !seen.insert(url.as_str().to_string()) {
                continue;
            }

            candidates.push(LinkCandidate {
                anchor_text: collapse_whitespace(&element.text().collect::<String>()),
                context: capture_context(&element),
                class_tokens: collect_class_tokens(&element),
                url,
            });
        }
    }

    candidates
}

/// Captures a bounded text window from the anchor's nearest ancestor element
///
/// Product tiles typically wrap the anchor together with the price and the
/// add-to-cart control, so the parent's text is the window the heuristics
/// and the LLM prompt look at.
fn capture_context(element: &ElementRef) -> String {
    let parent_text = element
        .parent()
        .and_then(ElementRef::wrap)
        .map(|parent| parent.text().collect::<String>())
        .unwrap_or_default();

    let collapsed = collapse_whitespace(&parent_text);
    truncate_chars(&collapsed, CONTEXT_WINDOW)
}

/// Collects lowercase class and id tokens from the anchor and its nearest
/// ancestor elements
fn collect_class_tokens(element: &ElementRef) -> HashSet<String> {
    let mut tokens = HashSet::new();

    push_element_tokens(element, &mut tokens);

    for ancestor in element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(ANCESTOR_DEPTH)
    {
        push_element_tokens(&ancestor, &mut tokens);
    }

    tokens
}

fn push_element_tokens(element: &ElementRef, tokens: &mut HashSet<String>) {
    for class in element.value().classes() {
        tokens.insert(class.to_lowercase());
    }
    if let Some(id) = element.value().attr("id") {
        for token in id.split_whitespace() {
            tokens.insert(token.to_lowercase());
        }
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates a string to at most `max` characters on a char boundary
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
