//! Sequential event dispatch loop.

use dockhook_common::error::{DockhookError, Result};
use dockhook_common::types::EventRecord;
use futures::{Stream, StreamExt};

use crate::notifier::Notifier;
use crate::webhook::WebhookSink;

/// Feeds every event from `events` to `notifier`, one at a time.
///
/// Each notification completes before the next event is polled, so a slow
/// webhook stalls consumption. The loop only ends on failure.
///
/// # Errors
///
/// Returns the first error item from the stream, or
/// [`DockhookError::StreamClosed`] if the stream ends.
pub async fn run<E, S>(mut events: E, notifier: &Notifier<S>) -> Result<()>
where
    E: Stream<Item = Result<EventRecord>> + Unpin,
    S: WebhookSink,
{
    tracing::info!("listening for events");
    while let Some(item) = events.next().await {
        let event = item?;
        let _ = notifier.notify(&event).await;
    }
    Err(DockhookError::StreamClosed)
}
