//! Blog API HTTP client.

use std::sync::Arc;

use reqwest::{Client, Response};

use crate::api::signer::{ApiKeySigner, FeedRequest, RequestSigner};
use crate::config::{Config, RetryConfig};
use crate::error::{Error, Result};
use crate::retry::retry_with_backoff;

/// HTTP client for metadata pages and media files.
pub struct BlogApi {
    client: Client,
    signer: Arc<dyn RequestSigner>,
    retry: RetryConfig,
}

impl BlogApi {
    /// Create a client with a custom signer.
    pub fn new(signer: Arc<dyn RequestSigner>, retry: RetryConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            signer,
            retry,
        })
    }

    /// Create a client signing with the configured API key.
    pub fn from_config(config: &Config) -> Result<Self> {
        let signer = ApiKeySigner::from_config(config)?;
        Self::new(Arc::new(signer), config.retry.clone())
    }

    /// Request one metadata page, retrying under the backoff policy.
    ///
    /// Transport failures and non-2xx statuses are both retried. The returned
    /// response has a success status and an unread body.
    pub async fn get_page(&self, request: &FeedRequest) -> Result<Response> {
        retry_with_backoff(&self.retry, || self.try_get_page(request)).await
    }

    async fn try_get_page(&self, request: &FeedRequest) -> Result<Response> {
        let signed = self.signer.sign(&self.client, request)?;
        let url = signed.url().to_string();

        tracing::debug!("GET {}", url);

        let response = self.client.execute(signed).await.map_err(|e| {
            tracing::warn!("Failed to get metadata ({}): {}", request.handle, e);
            Error::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                "Failed to get metadata ({} offset {}), non-OK HTTP status: {}",
                request.handle,
                request.offset,
                status
            );
            return Err(Error::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        tracing::info!(
            "Requested {} page at offset {} of {}",
            request.kind,
            request.offset,
            request.handle
        );

        Ok(response)
    }

    /// Request a media file. Not retried.
    pub async fn download_file(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}
