use crate::url::{host_key, parse_url};
use crate::UrlError;
use std::fmt;

/// A canonical deduplication key derived from a URL
///
/// The key is the host (with any explicit port) immediately followed by the path,
/// with the scheme, query and fragment dropped. Keys order lexicographically so
/// reports can sort them deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a URL into its deduplication key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or relative
/// 2. Take the host key (host plus any non-default port, one trailing slash trimmed)
/// 3. Take the path and trim a single trailing slash
/// 4. Concatenate host key and path
///
/// Scheme, query string and fragment never reach the key, so URLs that differ only
/// in `http`/`https` or in one trailing slash collapse to the same key. No
/// percent-decoding or query sorting happens here. Host case folding is whatever
/// the `url` parser already applies to special schemes; path case is preserved.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(NormalizedUrl)` - The deduplication key
/// * `Err(UrlError)` - The URL could not be parsed or has no host
///
/// # Examples
///
/// ```
/// use sumi_tally::url::normalize_url;
///
/// let key = normalize_url("https://blog.boot.dev/path/").unwrap();
/// assert_eq!(key.as_str(), "blog.boot.dev/path");
///
/// let key = normalize_url("http://blog.boot.dev/path").unwrap();
/// assert_eq!(key.as_str(), "blog.boot.dev/path");
/// ```
pub fn normalize_url(url_str: &str) -> Result<NormalizedUrl, UrlError> {
    let url = parse_url(url_str)?;
    let host = host_key(&url).ok_or(UrlError::MissingHost)?;

    let path = url.path();
    let path = path.strip_suffix('/').unwrap_or(path);

    Ok(NormalizedUrl(format!("{}{}", host, path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_https_scheme() {
        let result = normalize_url("https://blog.boot.dev/path").unwrap();
        assert_eq!(result.as_str(), "blog.boot.dev/path");
    }

    #[test]
    fn test_remove_trailing_slash() {
        let result = normalize_url("https://blog.boot.dev/path/").unwrap();
        assert_eq!(result.as_str(), "blog.boot.dev/path");
    }

    #[test]
    fn test_http_instead_of_https() {
        let result = normalize_url("http://blog.boot.dev/path").unwrap();
        assert_eq!(result.as_str(), "blog.boot.dev/path");
    }

    #[test]
    fn test_only_host() {
        let result = normalize_url("https://blog.boot.dev/").unwrap();
        assert_eq!(result.as_str(), "blog.boot.dev");
    }

    #[test]
    fn test_bare_host_matches_root_slash() {
        let bare = normalize_url("https://blog.boot.dev").unwrap();
        let slashed = normalize_url("http://blog.boot.dev/").unwrap();
        assert_eq!(bare, slashed);
    }

    #[test]
    fn test_scheme_and_slash_variants_collapse() {
        let variants = [
            "https://example.com/docs/intro",
            "https://example.com/docs/intro/",
            "http://example.com/docs/intro",
            "http://example.com/docs/intro/",
        ];

        let keys: Vec<_> = variants
            .iter()
            .map(|v| normalize_url(v).unwrap())
            .collect();

        for key in &keys {
            assert_eq!(key.as_str(), "example.com/docs/intro");
        }
    }

    #[test]
    fn test_scheme_variants_collapse_with_explicit_port() {
        for port in [":443", ":80", ":8080"] {
            let variants = [
                format!("https://example.com{}/docs", port),
                format!("https://example.com{}/docs/", port),
                format!("http://example.com{}/docs", port),
                format!("http://example.com{}/docs/", port),
            ];

            let keys: Vec<_> = variants
                .iter()
                .map(|v| normalize_url(v).unwrap())
                .collect();
            for (variant, key) in variants.iter().zip(&keys) {
                assert_eq!(key, &keys[0], "{}", variant);
            }
        }

        assert_eq!(
            normalize_url("http://example.com:443/docs").unwrap().as_str(),
            "example.com/docs"
        );
        assert_eq!(
            normalize_url("https://example.com:8080/docs/").unwrap().as_str(),
            "example.com:8080/docs"
        );
    }

    #[test]
    fn test_default_port_matches_bare_host() {
        let bare = normalize_url("https://example.com/docs").unwrap();
        for variant in ["https://example.com:443/docs", "http://example.com:80/docs/"] {
            assert_eq!(normalize_url(variant).unwrap(), bare, "{}", variant);
        }
    }

    #[test]
    fn test_only_one_trailing_slash_removed() {
        let result = normalize_url("https://example.com/path//").unwrap();
        assert_eq!(result.as_str(), "example.com/path/");
    }

    #[test]
    fn test_query_and_fragment_dropped() {
        let result = normalize_url("https://example.com/page?b=2&a=1#top").unwrap();
        assert_eq!(result.as_str(), "example.com/page");
    }

    #[test]
    fn test_port_kept_in_key() {
        let result = normalize_url("http://127.0.0.1:4000/about/").unwrap();
        assert_eq!(result.as_str(), "127.0.0.1:4000/about");
    }

    #[test]
    fn test_path_case_preserved() {
        let result = normalize_url("https://example.com/Docs/README").unwrap();
        assert_eq!(result.as_str(), "example.com/Docs/README");
    }

    #[test]
    fn test_percent_encoding_untouched() {
        let result = normalize_url("https://example.com/a%20b").unwrap();
        assert_eq!(result.as_str(), "example.com/a%20b");
    }

    #[test]
    fn test_malformed_url() {
        let result = normalize_url("not a url");
        assert!(matches!(result, Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_missing_host() {
        let result = normalize_url("mailto:someone@example.com");
        assert_eq!(result, Err(UrlError::MissingHost));
    }

    #[test]
    fn test_display_matches_as_str() {
        let key = normalize_url("https://example.com/x").unwrap();
        assert_eq!(key.to_string(), key.as_str());
        assert_eq!(key.clone().into_string(), "example.com/x");
    }
}
