//! Notification text for container events.

use std::fmt;

use dockhook_common::types::{EventRecord, WebhookMessage};

/// Container actions that produce a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The container started.
    Start,
    /// The container's main process exited.
    Die,
    /// A command was executed inside the container.
    Exec {
        /// The executed command line, possibly empty.
        command: String,
    },
}

impl Action {
    /// Classifies a raw runtime action string. First match wins.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "start" => Some(Self::Start),
            "die" => Some(Self::Die),
            _ if raw.contains("exec_start") => Some(Self::Exec {
                command: exec_command(raw).to_owned(),
            }),
            _ => None,
        }
    }

    /// The verb phrase used in the notification, e.g. `is starting`.
    #[must_use]
    pub fn phrase(&self) -> String {
        match self {
            Self::Start => "is starting".to_owned(),
            Self::Die => "is die".to_owned(),
            Self::Exec { command } if command.is_empty() => "is exec-ing".to_owned(),
            Self::Exec { command } => format!("is exec-ing {command}"),
        }
    }
}

/// The runtime reports exec events as `exec_start: <command>`.
fn exec_command(raw: &str) -> &str {
    raw.split_once(':').map_or("", |(_, rest)| rest.trim())
}

/// Why an event produced no message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The actor has no `name` attribute.
    MissingName,
    /// The action is none of start, die, or exec.
    UnsupportedAction,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "missing name attribute"),
            Self::UnsupportedAction => write!(f, "unsupported action"),
        }
    }
}

/// Builds the webhook message for an event.
///
/// The template prefixes the phrase with another `is`, so a start event
/// reads `*web1* is is starting:`. Downstream consumers match on that text.
///
/// # Errors
///
/// Returns a [`Rejection`] when the event should be skipped.
pub fn compose(event: &EventRecord) -> Result<WebhookMessage, Rejection> {
    let name = event.name().ok_or(Rejection::MissingName)?;
    let action = Action::parse(&event.action).ok_or(Rejection::UnsupportedAction)?;
    let text = format!(
        "*{name}* is {phrase}:\n```\n{attributes}\n```",
        phrase = action.phrase(),
        attributes = event.actor.attributes,
    );
    Ok(WebhookMessage { text })
}
