//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the identifying user agent
//! - GET requests to fetch page content
//! - Classifying the outcome as success, status error, or transport error

use reqwest::{redirect::Policy, Client, StatusCode};

/// Maximum redirect hops followed before the request is treated as failed
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The page answered `200 OK`
    Success {
        /// URL the body was served from, after any redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// The page answered with any status other than `200`
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// The request never produced a usable response
    /// (connection refused, DNS failure, timeout, unreadable body)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client that identifies itself with `user_agent`
///
/// No request timeout is configured; requests run until the server or the
/// operating system gives up.
///
/// # Example
///
/// ```no_run
/// use crawl_check::crawler::build_http_client;
///
/// let client = build_http_client("crawl-check/0.1.0").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the response
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | `Success` with the final URL and the body |
/// | Any other status (after redirects) | `HttpError` |
/// | Connection refused, DNS failure, timeout | `NetworkError` |
/// | Body could not be read | `NetworkError` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The absolute URL to fetch; it is percent-encoded on parse
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_transport_error(&e),
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();

    match response.text().await {
        Ok(body) => FetchResult::Success { final_url, body },
        Err(e) => FetchResult::NetworkError {
            error: format!("Failed to read body: {}", e),
        },
    }
}

fn classify_transport_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        format!("Request timeout: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_redirect() {
        format!("Redirect error: {}", e)
    } else if e.is_builder() {
        format!("Invalid request: {}", e)
    } else {
        e.to_string()
    };

    FetchResult::NetworkError { error }
}
