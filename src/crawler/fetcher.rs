//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the auditor, including:
//! - Building the shared HTTP client with the configured User-Agent
//! - Plain GET requests for robots.txt and sitemaps
//! - Page GET requests that keep partial results on failure
//! - HEAD requests to read asset sizes, through a client that leaves
//!   compressed responses alone

use crate::config::Config;
use crate::AuditError;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONTENT_LENGTH,
};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// Accept-Encoding sent with asset HEAD requests
const PROBE_ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// A fetched text resource
#[derive(Debug, Clone)]
pub struct FetchedText {
    /// HTTP status code
    pub status: u16,
    /// Final URL after redirects
    pub final_url: String,
    /// Response body
    pub body: String,
}

impl FetchedText {
    /// Returns true for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Result of fetching a page to audit
#[derive(Debug)]
pub enum PageFetch {
    /// The page body was read (any status code)
    Success {
        /// HTTP status code
        status: u16,
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// Response headers arrived but the body could not be read
    BodyError {
        status: u16,
        final_url: String,
        error: String,
    },

    /// No response at all (DNS, connection refused, timeout, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed automatically (up to 10 hops) so page audits record
/// the post-redirect URL.
///
/// # Example
///
/// ```no_run
/// use sitemap_audit::config::Config;
/// use sitemap_audit::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.value.as_str())
        .timeout(Duration::from_secs(config.crawl.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the client used for asset HEAD requests
///
/// Automatic decompression is disabled: reqwest strips `Content-Length` from
/// responses it would decode, which would hide the transfer size of every
/// compressed asset. The client still advertises the usual encodings so the
/// server reports the size it would actually send.
pub fn build_probe_client(config: &Config) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_ENCODING,
        HeaderValue::from_static(PROBE_ACCEPT_ENCODING),
    );

    Client::builder()
        .user_agent(config.user_agent.value.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.crawl.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .no_gzip()
        .no_brotli()
        .build()
}

/// Performs a GET request and reads the body as text
///
/// Non-success statuses are not errors here; callers decide via
/// [`FetchedText::is_success`].
pub async fn get_text(
    client: &Client,
    url: &str,
    headers: &[(HeaderName, &str)],
) -> Result<FetchedText, AuditError> {
    let mut request = client.get(url);
    for (name, value) in headers {
        request = request.header(name.clone(), *value);
    }

    let response = request.send().await.map_err(|source| AuditError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let body = response.text().await.map_err(|source| AuditError::Http {
        url: url.to_string(),
        source,
    })?;

    Ok(FetchedText {
        status,
        final_url,
        body,
    })
}

/// Fetches a page for auditing
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The page URL
/// * `accept_language` - Accept-Language header value
pub async fn fetch_page(client: &Client, url: &str, accept_language: &str) -> PageFetch {
    let response = match client
        .get(url)
        .header(ACCEPT_LANGUAGE, accept_language)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return PageFetch::NetworkError { error };
        }
    };

    let status = response.status().as_u16();
    let final_url = response.url().to_string();

    match response.text().await {
        Ok(body) => PageFetch::Success {
            status,
            final_url,
            body,
        },
        Err(e) => PageFetch::BodyError {
            status,
            final_url,
            error: e.to_string(),
        },
    }
}

/// Sends a HEAD request and returns the advertised Content-Length
///
/// `client` should come from [`build_probe_client`]. Any failure (network
/// error, missing or malformed header) yields `None`, as does a URL that is
/// not http(s) such as `data:`.
pub async fn head_content_length(client: &Client, url: &str) -> Option<u64> {
    if !is_http_url(url) {
        return None;
    }

    match client.head(url).send().await {
        Ok(response) => parse_content_length(response.headers()),
        Err(e) => {
            tracing::debug!("HEAD {} failed: {}", url, e);
            None
        }
    }
}

fn is_http_url(url: &str) -> bool {
    Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Reads the Content-Length header as a byte count
pub fn parse_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
