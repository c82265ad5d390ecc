//! HTML parser for extracting links
//!
//! Every `<a href>` in the document is resolved against the crawl's base URL and
//! returned in document order. Hrefs that can never name a crawlable page
//! (`javascript:`, `mailto:`, `tel:`, `data:`, non-HTTP schemes) are dropped here.
//! Fragment-only links are kept: they resolve to the base page and count as an
//! internal link to it.

use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

/// Reasons link extraction can fail
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Invalid base URL '{url}': {message}")]
    InvalidBase { url: String, message: String },

    #[error("Invalid link selector: {0}")]
    Selector(String),
}

/// Turns page content into absolute link URLs
pub trait LinkExtractor: Send + Sync {
    /// Extracts links from `content`, resolving relative ones against `base_url`
    fn extract_links(&self, content: &str, base_url: &str) -> Result<Vec<String>, ExtractError>;
}

/// [`LinkExtractor`] backed by `scraper`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, content: &str, base_url: &str) -> Result<Vec<String>, ExtractError> {
        get_urls_from_html(content, base_url)
    }
}

/// Extracts every followable link from an HTML document
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `raw_base_url` - The URL relative links are resolved against
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Absolute URLs, in document order, duplicates included
/// * `Err(ExtractError)` - The base URL could not be parsed
///
/// # Example
///
/// ```
/// use sumi_tally::crawler::get_urls_from_html;
///
/// let html = r#"<html><body><a href="/path/one">One</a></body></html>"#;
/// let links = get_urls_from_html(html, "https://example.com").unwrap();
/// assert_eq!(links, vec!["https://example.com/path/one".to_string()]);
/// ```
pub fn get_urls_from_html(html: &str, raw_base_url: &str) -> Result<Vec<String>, ExtractError> {
    let base_url = Url::parse(raw_base_url).map_err(|e| ExtractError::InvalidBase {
        url: raw_base_url.to_string(),
        message: e.to_string(),
    })?;

    let selector =
        Selector::parse("a[href]").map_err(|e| ExtractError::Selector(format!("{:?}", e)))?;

    let document = Html::parse_document(html);
    let links = document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, &base_url))
        .collect();

    Ok(links)
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Unresolvable hrefs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
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

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
