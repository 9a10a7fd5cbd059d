//! Core HTTP operations with optional retry logic
//!
//! Requests are issued one at a time and each response is consumed or dropped
//! before the call returns. Only transport failures are retried; a response
//! with any status is final.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, error, warn};
use url::Url;

use super::{ClientConfig, Transport};
use crate::errors::{FetchError, FetchResult};

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpHandler {
    client: Client,
    head_client: Client,
    config: ClientConfig,
}

impl HttpHandler {
    /// Creates a new HttpHandler from the given configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if either HTTP client cannot be built
    pub fn new(config: ClientConfig) -> FetchResult<Self> {
        let client = config.build_http_client()?;
        let head_client = config.build_head_client()?;
        Ok(Self {
            client,
            head_client,
            config,
        })
    }

    /// Sends a request, retrying transport failures with exponential backoff
    async fn send<F>(&self, url: &Url, build: F) -> FetchResult<Response>
    where
        F: Fn() -> RequestBuilder + Send + Sync,
    {
        let max_retries = self.config.max_retries;
        let mut retries = 0;
        loop {
            match build().send().await {
                Ok(response) => return Ok(response),
                Err(e) if retries < max_retries => {
                    retries += 1;
                    let delay = self.config.retry_delay(retries);
                    warn!(
                        "Request to {} failed (attempt {}/{}): {}. Retrying in {}ms",
                        url,
                        retries,
                        max_retries,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) if max_retries == 0 => return Err(FetchError::Http(e)),
                Err(e) => {
                    error!("Request to {} failed after {} retries: {}", url, max_retries, e);
                    return Err(FetchError::MaxRetriesExceeded {
                        max_retries,
                        url: url.to_string(),
                    });
                }
            }
        }
    }

    /// GET that insists on a success status
    async fn get_ok(&self, url: &Url) -> FetchResult<Response> {
        let response = self.send(url, || self.client.get(url.as_str())).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    /// The client's configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpHandler {
    async fn head_status(&self, url: &Url) -> FetchResult<u16> {
        let response = self
            .send(url, || self.head_client.head(url.as_str()))
            .await?;
        let status = response.status().as_u16();
        debug!("HEAD {} -> {}", url, status);
        Ok(status)
    }

    async fn get_text(&self, url: &Url) -> FetchResult<String> {
        let response = self.get_ok(url).await?;
        let text = response.text().await?;
        debug!("Fetched {} bytes from {}", text.len(), url);
        Ok(text)
    }

    async fn get_prefix(&self, url: &Url, limit: usize) -> FetchResult<String> {
        let mut response = self.get_ok(url).await?;
        let mut buffer: Vec<u8> = Vec::with_capacity(limit.min(64 * 1024));

        while buffer.len() < limit {
            match response.chunk().await? {
                Some(chunk) => {
                    let take = chunk.len().min(limit - buffer.len());
                    buffer.extend_from_slice(&chunk[..take]);
                }
                None => break,
            }
        }

        debug!("Read {} of at most {} bytes from {}", buffer.len(), limit, url);
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
