use url::Url;

/// Extracts the host from a URL
///
/// Retrieves the host portion of a URL and converts it to lowercase. Returns
/// None if the URL has no host (which shouldn't happen for valid HTTP(S)
/// URLs).
///
/// # Arguments
///
/// * `url` - The URL to extract the host from
///
/// # Returns
///
/// * `Some(String)` - The lowercase host
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use spider_recon::url::extract_host;
///
/// let url = Url::parse("https://shop.example.com/path").unwrap();
/// assert_eq!(extract_host(&url), Some("shop.example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a candidate URL belongs to the site being crawled
///
/// A link is internal when its host equals the category page's host or is a
/// subdomain of it (e.g. `shop.example.com` is internal to `example.com`).
/// Hosts are compared case-insensitively.
///
/// # Arguments
///
/// * `candidate` - The resolved candidate URL
/// * `base_host` - The lowercase host of the category page
///
/// # Returns
///
/// * `true` - The candidate stays on the category's site
/// * `false` - The candidate points off-site or has no host
pub fn is_internal(candidate: &Url, base_host: &str) -> bool {
    match extract_host(candidate) {
        Some(host) => host == base_host || host.ends_with(&format!(".{}", base_host)),
        None => false,
    }
}
