use url::Url;

/// Extracts the host key of a URL
///
/// The host key is the host plus any port that is not one of the two web
/// defaults (80, 443). The `url` parser only drops a port that matches the
/// URL's own scheme, so `http://example.com:443` keeps `:443` while
/// `https://example.com:443` does not; eliding both defaults regardless of
/// scheme gives every scheme variant of a URL the same key. Any other port is
/// kept, so two servers on the same machine but different ports are treated as
/// different sites. A single trailing slash is trimmed from the host, although
/// parsed hosts practically never carry one.
///
/// # Arguments
///
/// * `url` - The URL to extract the host key from
///
/// # Returns
///
/// * `Some(String)` - The host, with `:port` appended for non-default ports
/// * `None` - If the URL has no host (e.g. `mailto:` or `data:` URLs)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_tally::url::host_key;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(host_key(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/path").unwrap();
/// assert_eq!(host_key(&url), Some("127.0.0.1:8080".to_string()));
///
/// let url = Url::parse("http://example.com:443/path").unwrap();
/// assert_eq!(host_key(&url), Some("example.com".to_string()));
/// ```
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let host = host.strip_suffix('/').unwrap_or(host);

    match url.port().filter(|port| !is_web_default_port(*port)) {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

fn is_web_default_port(port: u16) -> bool {
    matches!(port, 80 | 443)
}
