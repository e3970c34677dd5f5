//! Unified error types for the dockhook workspace.

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DockhookError {
    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// The container runtime client could not be created.
    #[error("error creating client: {message}")]
    Connect {
        /// Underlying client error.
        message: String,
    },

    /// The runtime did not answer the server info request.
    #[error("error fetching server info: {message}")]
    ServerInfo {
        /// Underlying client error.
        message: String,
    },

    /// The runtime reported an error on the event stream.
    #[error("error reading events: {message}")]
    EventStream {
        /// Underlying stream error.
        message: String,
    },

    /// The runtime closed the event stream.
    #[error("event stream closed by the runtime")]
    StreamClosed,

    /// A webhook request could not be built or sent.
    #[error("error submitting webhook to {url}: {message}")]
    Webhook {
        /// Target webhook URL.
        url: String,
        /// Underlying transport error.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DockhookError>;
