use crate::config::validation::validate_crawl_limits;
use crate::url::{host_key, parse_url};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Immutable settings for one crawl
///
/// Holds the seed URL (whose host scopes the crawl), the maximum number of
/// simultaneous fetches, and the maximum number of distinct pages to visit.
/// Construct it with [`CrawlConfig::new`]; it cannot be mutated afterwards.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    seed: String,
    base_url: Url,
    base_host: String,
    max_concurrency: usize,
    max_pages: usize,
}

impl CrawlConfig {
    /// Validates the invocation arguments and builds the crawl settings
    ///
    /// # Errors
    ///
    /// * [`ConfigError::InvalidUrl`] - The seed is not an absolute http(s) URL with a host
    /// * [`ConfigError::Validation`] - A limit is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_tally::config::CrawlConfig;
    ///
    /// let config = CrawlConfig::new("https://example.com", 3, 10).unwrap();
    /// assert_eq!(config.base_host(), "example.com");
    ///
    /// assert!(CrawlConfig::new("https://example.com", 0, 10).is_err());
    /// assert!(CrawlConfig::new("example.com", 3, 10).is_err());
    /// ```
    pub fn new(seed: &str, max_concurrency: usize, max_pages: usize) -> ConfigResult<Self> {
        validate_crawl_limits(max_concurrency, max_pages)?;

        let base_url =
            parse_url(seed).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", seed, e)))?;

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "{}: only http and https seeds are supported",
                seed
            )));
        }

        let base_host = host_key(&base_url)
            .ok_or_else(|| ConfigError::InvalidUrl(format!("{}: missing host", seed)))?;

        Ok(Self {
            seed: seed.to_string(),
            base_url,
            base_host,
            max_concurrency,
            max_pages,
        })
    }

    /// The seed exactly as it was given
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// The parsed seed URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The host key every crawled page must share
    pub fn base_host(&self) -> &str {
        &self.base_host
    }

    /// Maximum number of simultaneous fetches
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Maximum number of distinct pages to visit
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Returns true if `url` is on the seed's host
    pub fn in_scope(&self, url: &Url) -> bool {
        host_key(url).as_deref() == Some(self.base_host.as_str())
    }
}
