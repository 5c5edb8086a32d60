//! HTTP fetcher implementation
//!
//! This module defines the [`PageFetcher`] capability the traversal engine
//! fetches through, the [`FetchError`] taxonomy for everything that can go
//! wrong with a single page, and the reqwest-backed [`HttpFetcher`].
//!
//! Fetch failures are branch-local: the traversal engine logs and counts
//! them, and the branch terminates without affecting siblings. Nothing here
//! retries.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Ways fetching a single page can fail
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status code
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Connection, TLS, or timeout failure before a response arrived
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// The response body could not be decoded as text
    #[error("decode error for {url}: {message}")]
    Decode { url: String, message: String },
}

/// Capability that retrieves raw content for a URL
///
/// Redirects are the fetcher's concern and are followed transparently; the
/// traversal engine only ever sees a decoded body or a [`FetchError`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`, returning the decoded response body
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Builds the HTTP client used for all crawl requests
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header value for every request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Reqwest-backed page fetcher
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent)?,
        })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_build_http_client() {
        let client = build_http_client("test-bot/1.0");
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new("test-bot/1.0").unwrap();
        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();
        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body, "<html>hi</html>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new("test-bot/1.0").unwrap();
        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Nothing listens on this port
        let fetcher = HttpFetcher::new("test-bot/1.0").unwrap();
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("location", format!("{}/new", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved here"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new("test-bot/1.0").unwrap();
        let url = Url::parse(&format!("{}/old", server.uri())).unwrap();
        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body, "moved here");
    }
}
