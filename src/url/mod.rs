//! URL handling module for skimmer
//!
//! URLs are the identity keys of the visited set, so every address must be
//! brought to the same absolute form before it is tested for membership or
//! stored. Relative links are resolved against their referring page by the
//! HTML parser; this module handles the normalization itself.

use crate::UrlError;
use url::Url;

/// Normalizes a URL string into the canonical absolute form used as the
/// visited-set key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Restrict the scheme to http or https
/// 3. Require a host (the `url` crate lowercases it during parsing)
/// 4. Remove the fragment (everything after #)
///
/// Query strings are kept as-is: two URLs differing only in query order are
/// treated as distinct pages, matching how they are served.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or normalize the URL
///
/// # Examples
///
/// ```
/// use skimmer::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.COM/page#section").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}

/// Normalizes an already-parsed URL in place, applying the same rules as
/// [`normalize_url`]
pub fn normalize_parsed(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_host() {
        let result = normalize_url("https://EXAMPLE.COM/Page").unwrap();
        assert_eq!(result.as_str(), "https://example.com/Page");
    }

    #[test]
    fn test_remove_fragment() {
        let result = normalize_url("https://example.com/page#section").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_keep_query() {
        let result = normalize_url("https://example.com/page?q=rust").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page?q=rust");
    }

    #[test]
    fn test_empty_path_becomes_root() {
        let result = normalize_url("https://example.com").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_http_allowed() {
        let result = normalize_url("http://127.0.0.1:8080/page").unwrap();
        assert_eq!(result.as_str(), "http://127.0.0.1:8080/page");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = normalize_url("ftp://example.com/page");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_malformed_url() {
        let result = normalize_url("not a url");
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_parsed_strips_fragment() {
        let url = Url::parse("https://example.com/a#frag").unwrap();
        let result = normalize_parsed(url).unwrap();
        assert_eq!(result.as_str(), "https://example.com/a");
    }
}
