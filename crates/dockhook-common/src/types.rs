//! Event and message types passed between the event source and the notifier.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::NAME_ATTRIBUTE;

/// Free-form string attributes attached to an event actor.
///
/// Keys are kept sorted so the rendered form is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// Creates an empty attribute set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Looks up a single attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Renders as `{key=value, key=value}`.
impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        write!(f, "}}")
    }
}

/// Subject of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    /// Runtime identifier of the container, when reported.
    pub id: Option<String>,
    /// Attributes such as `name` and `image`.
    pub attributes: Attributes,
}

/// A single lifecycle event received from the container runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRecord {
    /// Raw action string, e.g. `start` or `exec_start: sh -c ls`.
    pub action: String,
    /// What the event is about.
    pub actor: Actor,
    /// When the runtime emitted the event.
    pub time: Option<DateTime<Utc>>,
}

impl EventRecord {
    /// Builds an event from an action and attribute pairs.
    #[must_use]
    pub fn new<I, K, V>(action: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            action: action.into(),
            actor: Actor {
                id: None,
                attributes: attributes.into_iter().collect(),
            },
            time: None,
        }
    }

    /// The container name, if the runtime reported one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.actor.attributes.get(NAME_ATTRIBUTE)
    }
}

/// JSON body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookMessage {
    /// Human-readable notification text.
    pub text: String,
}

impl WebhookMessage {
    /// Serializes the message to its wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::error::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
