//! URL handling module for Sumi-Tally
//!
//! This module provides URL parsing, normalization into deduplication keys, and the
//! host keys used to keep a crawl on its seed's site.

mod domain;
mod normalize;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::host_key;
pub use normalize::{normalize_url, NormalizedUrl};

/// Parses an absolute URL string
///
/// Relative references and strings that are not URLs at all are rejected with
/// [`UrlError::Parse`]. Discovered links are always resolved to absolute form by
/// the link extractor before they reach this point.
///
/// # Examples
///
/// ```
/// use sumi_tally::url::parse_url;
///
/// assert!(parse_url("https://example.com/page").is_ok());
/// assert!(parse_url("/relative/path").is_err());
/// ```
pub fn parse_url(url_str: &str) -> UrlResult<Url> {
    Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))
}
