//! Event-to-webhook notifier.

use dockhook_common::types::EventRecord;

use crate::message::{self, Rejection};
use crate::webhook::WebhookSink;

/// What happened to a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The event had no `name` attribute.
    Skipped,
    /// The action is not one the relay reports.
    Unsupported,
    /// The webhook answered with this HTTP status.
    Sent {
        /// Status code returned by the endpoint.
        status: u16,
    },
    /// The request could not be delivered.
    Failed,
}

/// Formats container events and hands them to a [`WebhookSink`].
///
/// Delivery errors are logged and swallowed; callers never see them as
/// `Err`.
#[derive(Debug)]
pub struct Notifier<S> {
    sink: S,
}

impl<S: WebhookSink> Notifier<S> {
    /// Creates a notifier delivering to `sink`.
    #[must_use]
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Returns the underlying sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Processes one event, making at most one delivery attempt.
    pub async fn notify(&self, event: &EventRecord) -> Delivery {
        tracing::info!(
            action = %event.action,
            attributes = %event.actor.attributes,
            id = event.actor.id.as_deref().unwrap_or_default(),
            time = %event.time.map(|t| t.to_rfc3339()).unwrap_or_default(),
            "event received"
        );

        let message = match message::compose(event) {
            Ok(message) => message,
            Err(Rejection::MissingName) => {
                tracing::info!(action = %event.action, "skipping event without name attribute");
                return Delivery::Skipped;
            }
            Err(Rejection::UnsupportedAction) => {
                tracing::info!(event = ?event, "unsupported action");
                return Delivery::Unsupported;
            }
        };

        match self.sink.post(&message).await {
            Ok(status) => {
                tracing::info!(status, url = %self.sink.url(), "sent webhook");
                Delivery::Sent { status }
            }
            Err(e) => {
                tracing::info!(error = %e, "error submitting webhook");
                Delivery::Failed
            }
        }
    }
}
