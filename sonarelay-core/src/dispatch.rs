use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header;
use thiserror::Error;
use tracing::{debug, info};

/// Outbound delivery failure: transport error or non-success response.
///
/// Either way the burst is gone; its state was removed from the store at
/// drain time and there is no retry.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request to target failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("target responded with {status}")]
    Status { status: StatusCode },
}

/// Outbound delivery boundary.
///
/// The relay only needs "send these bytes, observe the outcome", so the
/// transport stays swappable and tests use a recording double instead of a
/// network.
#[async_trait]
pub trait Dispatch: Send + Sync + 'static {
    async fn deliver(&self, body: Vec<u8>) -> Result<(), DeliveryError>;
}

/// Delivers payloads with a single POST to the configured target URL.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    target_url: String,
    content_header: String,
}

impl HttpDispatcher {
    pub fn new(target_url: impl Into<String>, content_header: impl Into<String>) -> Self {
        HttpDispatcher {
            client: reqwest::Client::new(),
            target_url: target_url.into(),
            content_header: content_header.into(),
        }
    }
}

#[async_trait]
impl Dispatch for HttpDispatcher {
    async fn deliver(&self, body: Vec<u8>) -> Result<(), DeliveryError> {
        debug!(
            url = %self.target_url,
            body = %String::from_utf8_lossy(&body),
            "posting notification to target"
        );

        let response = self
            .client
            .post(&self.target_url)
            .header(header::CONTENT_TYPE, self.content_header.as_str())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let response_body = response.text().await.unwrap_or_default();
        info!(%status, body = %response_body, "target response");

        if !status.is_success() {
            return Err(DeliveryError::Status { status });
        }
        Ok(())
    }
}
