//! HTTP document fetcher.
//!
//! One GET per call, redirects followed, the whole exchange bounded by the
//! configured timeout.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::{DocumentFetcher, FetchedDocument};
use crate::types::config::ExtractorConfig;

/// Fetches webpages over HTTP with reqwest.
///
/// # Example
///
/// ```rust,ignore
/// use link_extraction::{ExtractorConfig, HttpFetcher};
///
/// let fetcher = HttpFetcher::new(&ExtractorConfig::default())?;
/// let doc = fetcher.fetch("https://example.com").await?;
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests are bounded by `config.fetch_timeout()`.
    pub fn new(config: &ExtractorConfig) -> Result<Self, reqwest::Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );

        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    /// Use a preconfigured client instead (its own timeout applies).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedDocument> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            FetchError::from_reqwest(url, e)
        })?;

        // 3xx responses that survive redirect handling are treated as documents.
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            warn!(url = %url, status = %status, "HTTP error status");
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        debug!(url = %url, final_url = %final_url, bytes = body.len(), "HTTP fetch complete");

        Ok(FetchedDocument {
            url: url.to_string(),
            final_url,
            status: status.as_u16(),
            content_type,
            body,
            fetched_at: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one connection with a canned raw HTTP response.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}/", addr)
    }

    fn fast_fetcher() -> HttpFetcher {
        let config = ExtractorConfig::default();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(300))
            .no_proxy()
            .user_agent(config.user_agent)
            .build()
            .unwrap();
        HttpFetcher::with_client(client)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 18\r\nConnection: close\r\n\r\n<p>Hello world</p>",
        )
        .await;

        let doc = fast_fetcher().fetch(&url).await.unwrap();
        assert_eq!(doc.status, 200);
        assert_eq!(doc.body, "<p>Hello world</p>");
        assert_eq!(doc.content_type.as_deref(), Some("text/html"));
    }

    #[tokio::test]
    async fn test_fetch_http_status_is_propagated() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let err = fast_fetcher().fetch(&url).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamHttpError(404));
        assert_eq!(err.url(), url);
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_not_connection_error() {
        // Accept the connection but never answer.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((socket, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(5)).await;
                drop(socket);
            }
        });

        let err = fast_fetcher()
            .fetch(&format!("http://{}/", addr))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_fetch_refused_is_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fast_fetcher()
            .fetch(&format!("http://{}/", addr))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConnectionError);
    }

    #[test]
    fn test_default_fetcher_builds() {
        let fetcher = HttpFetcher::new(&ExtractorConfig::default()).unwrap();
        assert_eq!(fetcher.name(), "http");
    }
}
