//! Relay-wide constants.

/// Application name used in CLI output and the user agent.
pub const APP_NAME: &str = "dockhook";

/// Environment variable read when `--url` is not given.
pub const URL_ENV_VAR: &str = "DOCKHOOK_URL";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Event type the subscription is scoped to.
pub const EVENT_TYPE_CONTAINER: &str = "container";

/// Container actions requested from the runtime.
pub const SUBSCRIBED_ACTIONS: [&str; 3] = ["start", "die", "exec_start"];

/// Attribute key holding the container name.
pub const NAME_ATTRIBUTE: &str = "name";

/// Content type of the webhook payload.
pub const JSON_CONTENT_TYPE: &str = "application/json";
