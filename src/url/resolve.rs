use url::Url;

/// Resolves an anchor href to an absolute URL against its page
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs
/// - `javascript:`, `mailto:`, `tel:` schemes and `data:` URIs
/// - hrefs that fail to resolve
/// - non-HTTP(S) URLs after resolution
///
/// The fragment is stripped from the resolved URL so that two anchors
/// differing only in fragment compare equal.
///
/// # Arguments
///
/// * `href` - The raw href attribute value
/// * `base_url` - The page URL relative hrefs resolve against
///
/// # Returns
///
/// * `Some(Url)` - The absolute, fragment-free URL
/// * `None` - The href is excluded or unresolvable
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    // Skip empty hrefs
    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(mut absolute_url) => {
            // Only accept HTTP and HTTPS URLs
            if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
                return None;
            }
            absolute_url.set_fragment(None);
            Some(absolute_url)
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://shop.example.com/shoes").unwrap()
    }

    #[test]
    fn test_resolve_absolute() {
        let resolved = resolve_href("https://shop.example.com/p/1", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://shop.example.com/p/1");
    }

    #[test]
    fn test_resolve_relative() {
        let resolved = resolve_href("/p/1", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://shop.example.com/p/1");
    }

    #[test]
    fn test_resolve_relative_path() {
        let resolved = resolve_href("sneakers", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://shop.example.com/sneakers");
    }

    #[test]
    fn test_fragment_stripped() {
        let resolved = resolve_href("/p/1#reviews", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://shop.example.com/p/1");
    }

    #[test]
    fn test_skip_fragment_only() {
        assert!(resolve_href("#top", &base_url()).is_none());
    }

    #[test]
    fn test_skip_empty() {
        assert!(resolve_href("   ", &base_url()).is_none());
    }

    #[test]
    fn test_skip_javascript() {
        assert!(resolve_href("javascript:void(0)", &base_url()).is_none());
    }

    #[test]
    fn test_skip_mailto() {
        assert!(resolve_href("mailto:sales@example.com", &base_url()).is_none());
    }

    #[test]
    fn test_skip_tel() {
        assert!(resolve_href("tel:+1234567890", &base_url()).is_none());
    }

    #[test]
    fn test_skip_data_uri() {
        assert!(resolve_href("data:text/html,<h1>x</h1>", &base_url()).is_none());
    }

    #[test]
    fn test_skip_non_http_scheme() {
        assert!(resolve_href("ftp://example.com/file", &base_url()).is_none());
    }
}
