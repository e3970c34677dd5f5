//! Relay configuration model.

use std::time::Duration;

use crate::error::{DockhookError, Result};

/// Immutable configuration handed to the webhook sink at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Endpoint that receives one POST per qualifying event.
    pub webhook_url: String,
    /// Upper bound on a single webhook request. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl RelayConfig {
    /// Builds a configuration for the given webhook URL with no timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DockhookError::Config`] if the URL is blank or does not use
    /// the `http` or `https` scheme.
    pub fn new(webhook_url: impl Into<String>) -> Result<Self> {
        let webhook_url = webhook_url.into().trim().to_owned();
        if webhook_url.is_empty() {
            return Err(DockhookError::Config {
                message: "webhook url is empty".into(),
            });
        }
        if !(webhook_url.starts_with("http://") || webhook_url.starts_with("https://")) {
            return Err(DockhookError::Config {
                message: format!("webhook url must be http or https: {webhook_url}"),
            });
        }
        Ok(Self {
            webhook_url,
            timeout: None,
        })
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
