//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Classifying failures into network, status, and content-type errors
//!
//! The crawl controller only sees the [`PageFetcher`] trait, so tests can swap in
//! an in-memory site.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct PageContent {
    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value
    pub content_type: String,

    /// Page body content
    pub body: String,
}

/// Reasons a fetch can fail
///
/// All of these are branch-local: they end the crawl of one page, never the crawl.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    #[error("Unsupported content-type '{0}', expected text/html")]
    UnsupportedContentType(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Retrieves page content for the crawl controller
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`, succeeding only for HTML responses
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The runtime configuration (user agent and HTTP settings)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_tally::config::Config;
/// use sumi_tally::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let redirect = match config.http.max_redirects {
        0 => Policy::none(),
        n => Policy::limited(n),
    };

    Client::builder()
        .user_agent(config.user_agent.user_agent_string())
        .timeout(Duration::from_secs(config.http.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.http.connect_timeout_secs))
        .redirect(redirect)
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the runtime configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a URL and classifies the result
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Connection / timeout / redirect failure | `Network` |
    /// | Non-2xx status | `HttpStatus(code)` |
    /// | Content-Type without `text/html` | `UnsupportedContentType` |
    /// | Body cannot be decoded | `Body` |
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        let response = self.client.get(url).send().await.map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(PageContent {
            status_code: status.as_u16(),
            content_type,
            body,
        })
    }
}

fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Network("Request timeout".to_string())
    } else if error.is_connect() {
        FetchError::Network("Connection refused".to_string())
    } else if error.is_redirect() {
        FetchError::Network("Too many redirects".to_string())
    } else {
        FetchError::Network(error.to_string())
    }
}
