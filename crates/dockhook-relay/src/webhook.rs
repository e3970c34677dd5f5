//! Webhook delivery.

use async_trait::async_trait;
use dockhook_common::config::RelayConfig;
use dockhook_common::constants::{APP_NAME, JSON_CONTENT_TYPE};
use dockhook_common::error::{DockhookError, Result};
use dockhook_common::types::WebhookMessage;
use reqwest::header::CONTENT_TYPE;

/// Destination for notification messages.
///
/// Implementors perform exactly one delivery attempt per call.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    /// The endpoint messages are delivered to.
    fn url(&self) -> &str;

    /// Delivers one message and returns the HTTP status code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be sent or no response
    /// arrived. A non-2xx status is not an error.
    async fn post(&self, message: &WebhookMessage) -> Result<u16>;
}

/// Posts messages as JSON over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpWebhook {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl HttpWebhook {
    /// Creates a sink for the configured webhook URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client cannot
    /// be constructed.
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let url = reqwest::Url::parse(&config.webhook_url).map_err(|e| DockhookError::Config {
            message: format!("invalid webhook url {}: {e}", config.webhook_url),
        })?;

        let mut builder = reqwest::Client::builder()
            .user_agent(format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| DockhookError::Webhook {
            url: url.to_string(),
            message: format!("failed to build http client: {e}"),
        })?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl WebhookSink for HttpWebhook {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn post(&self, message: &WebhookMessage) -> Result<u16> {
        let body = message.to_json()?;
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| DockhookError::Webhook {
                url: self.url.to_string(),
                message: e.to_string(),
            })?;
        Ok(response.status().as_u16())
    }
}
