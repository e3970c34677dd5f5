//! # dockhook-relay
//!
//! The event-to-webhook pipeline:
//!
//! ```text
//! Docker events --(filter: container start/die/exec_start)--> EventSource
//!     |
//! dispatch::run (one event at a time)
//!     |
//! Notifier.notify() --> message::compose() --> WebhookSink.post()
//! ```
//!
//! - [`source`]: [`EventSource`](source::EventSource) seam and the bollard-backed adapter.
//! - [`message`]: action parsing and notification text.
//! - [`webhook`]: [`WebhookSink`](webhook::WebhookSink) seam and the reqwest-backed sink.
//! - [`notifier`]: turns one event into at most one delivery.
//! - [`dispatch`]: the sequential consume loop.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod dispatch;
pub mod message;
pub mod notifier;
pub mod source;
pub mod webhook;

pub use notifier::{Delivery, Notifier};
pub use source::{DockerEventSource, EventSource};
pub use webhook::{HttpWebhook, WebhookSink};
