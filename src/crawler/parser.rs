//! HTML parser for extracting scoreable text and outbound links
//!
//! Two views of a fetched page matter to the traversal engine: the plain
//! text that gets scored, and the anchor targets that seed deeper
//! traversal. Both are extracted here with scraper.

use crate::url::normalize_parsed;
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Plain text from heading and paragraph elements
    pub text: String,

    /// Outbound links resolved to absolute URLs, in document order
    pub links: Vec<Url>,
}

/// Parses HTML content and extracts scoreable text plus outbound links
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        text: extract_text(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page's scoreable plain text
///
/// Text is taken from heading (h1-h6) and paragraph elements only, in
/// document order, joined by single spaces. Script bodies, navigation
/// chrome, and other markup contribute nothing. Absent content yields the
/// empty string.
fn extract_text(document: &Html) -> String {
    let selector = match Selector::parse("h1, h2, h3, h4, h5, h6, p") {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts all valid anchor targets from the HTML document
///
/// Every `<a href>` is resolved to an absolute URL against `base_url`.
/// Document order is preserved. Excluded hrefs:
///
/// - `javascript:`, `mailto:`, `tel:` schemes and data URIs
/// - fragment-only links (same-page anchors)
/// - anything that fails to resolve, or resolves to a non-HTTP(S) scheme
fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded. The resolved URL is pushed
/// through the same normalization as every other visited-set key.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Fragment-only links point back at the same page
    if href.starts_with('#') {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    normalize_parsed(absolute_url).ok()
}
