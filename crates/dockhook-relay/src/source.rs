//! Container runtime event source.

use std::collections::HashMap;

use async_trait::async_trait;
use bollard::Docker;
use bollard::models::EventMessage;
use bollard::system::EventsOptions;
use chrono::DateTime;
use dockhook_common::constants::{EVENT_TYPE_CONTAINER, SUBSCRIBED_ACTIONS};
use dockhook_common::error::{DockhookError, Result};
use dockhook_common::types::{Actor, EventRecord};
use futures::StreamExt;
use futures::stream::BoxStream;

/// Stream of events; an `Err` item is terminal.
pub type EventStream<'a> = BoxStream<'a, Result<EventRecord>>;

/// A runtime that can be queried and subscribed to.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetches the runtime's server name, verifying connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`DockhookError::ServerInfo`] if the runtime does not answer.
    async fn server_name(&self) -> Result<String>;

    /// Subscribes to container `start`, `die` and `exec_start` events.
    fn subscribe(&self) -> EventStream<'_>;
}

/// Server-side filter: `type=container` and any of the subscribed actions.
#[must_use]
pub fn container_filter() -> HashMap<String, Vec<String>> {
    HashMap::from([
        ("type".to_owned(), vec![EVENT_TYPE_CONTAINER.to_owned()]),
        (
            "event".to_owned(),
            SUBSCRIBED_ACTIONS.iter().map(|&a| a.to_owned()).collect(),
        ),
    ])
}

/// Docker Engine API event source.
#[derive(Debug, Clone)]
pub struct DockerEventSource {
    docker: Docker,
}

impl DockerEventSource {
    /// Connects using the ambient environment (`DOCKER_HOST` or the local socket).
    ///
    /// # Errors
    ///
    /// Returns [`DockhookError::Connect`] if the client cannot be created.
    pub fn connect() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults().map_err(|e| DockhookError::Connect {
            message: e.to_string(),
        })?;
        Ok(Self { docker })
    }
}

#[async_trait]
impl EventSource for DockerEventSource {
    async fn server_name(&self) -> Result<String> {
        let info = self
            .docker
            .info()
            .await
            .map_err(|e| DockhookError::ServerInfo {
                message: e.to_string(),
            })?;
        Ok(info.name.unwrap_or_default())
    }

    fn subscribe(&self) -> EventStream<'_> {
        let options = EventsOptions::<String> {
            filters: container_filter(),
            ..Default::default()
        };
        self.docker
            .events(Some(options))
            .map(|item| {
                item.map(event_record)
                    .map_err(|e| DockhookError::EventStream {
                        message: e.to_string(),
                    })
            })
            .boxed()
    }
}

fn event_record(message: EventMessage) -> EventRecord {
    let actor = message.actor.unwrap_or_default();
    let time = message
        .time_nano
        .map(DateTime::from_timestamp_nanos)
        .or_else(|| message.time.and_then(|secs| DateTime::from_timestamp(secs, 0)));
    EventRecord {
        action: message.action.unwrap_or_default(),
        actor: Actor {
            id: actor.id,
            attributes: actor.attributes.unwrap_or_default().into_iter().collect(),
        },
        time,
    }
}
