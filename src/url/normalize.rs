use ::url::Url;

/// Returns true if `candidate` is a syntactically valid absolute URL
///
/// A URL counts as absolute when it parses on its own and names a host.
/// Scheme-only forms such as `mailto:` or `javascript:` do not.
///
/// # Examples
///
/// ```
/// use robofinder::url::is_absolute_url;
///
/// assert!(is_absolute_url("https://example.com/sitemap.xml"));
/// assert!(!is_absolute_url("/admin"));
/// assert!(!is_absolute_url("mailto:admin@example.com"));
/// ```
pub fn is_absolute_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => url.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}

/// Joins an extracted path onto the site's base URL
///
/// # Normalization Rules
///
/// 1. Already an absolute URL: returned unchanged
/// 2. Starts with `/`: `base_url + path`
/// 3. Anything else: `base_url + "/" + path`
///
/// The join is plain string concatenation; wildcard patterns such as
/// `/*.php$` are not percent-encoded or otherwise rewritten.
///
/// # Examples
///
/// ```
/// use robofinder::url::normalize_path;
///
/// assert_eq!(normalize_path("/admin", "https://x.com"), "https://x.com/admin");
/// assert_eq!(normalize_path("admin", "https://x.com"), "https://x.com/admin");
/// assert_eq!(
///     normalize_path("https://other.com/p", "https://x.com"),
///     "https://other.com/p"
/// );
/// ```
pub fn normalize_path(path: &str, base_url: &str) -> String {
    if is_absolute_url(path) {
        path.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}
