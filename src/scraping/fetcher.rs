use super::browser_headers::{browser_headers, random_user_agent};
use crate::core::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

/// Retrieves raw HTML for an article URL.
///
/// Implementations must return promptly once `cancel` fires. No retries are
/// performed at this layer.
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, cancel: CancellationToken) -> Result<String, FetchError>;
}

/// Production fetcher over a shared `reqwest::Client`.
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Client with the request timeout applied at the transport level as well.
    pub fn build_client(timeout: Duration, connect_timeout: Duration) -> Result<Client, FetchError> {
        Ok(Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?)
    }

    async fn fetch_inner(&self, url: &Url) -> Result<String, FetchError> {
        let mut request_builder = self
            .client
            .get(url.as_str())
            .header("User-Agent", random_user_agent());
        for (header_name, header_value) in browser_headers() {
            request_builder = request_builder.header(header_name, header_value);
        }

        let response = request_builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }
}

#[async_trait]
impl HtmlFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &Url, cancel: CancellationToken) -> Result<String, FetchError> {
        info!("Fetching article HTML: {}", url);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = self.fetch_inner(url) => result,
        }
    }
}

/// Run `fetcher` under a hard deadline. On expiry the token is cancelled so
/// the in-flight request is dropped, and `FetchError::Timeout` is returned.
pub async fn fetch_with_timeout(
    fetcher: &dyn HtmlFetcher,
    url: &Url,
    timeout: Duration,
) -> Result<String, FetchError> {
    let cancel = CancellationToken::new();
    match tokio::time::timeout(timeout, fetcher.fetch(url, cancel.clone())).await {
        Ok(result) => result,
        Err(_) => {
            cancel.cancel();
            Err(FetchError::Timeout(timeout))
        }
    }
}
