//! Command-line interface and process wiring.

use std::io::{self, Write};
use std::time::Duration;

use clap::{CommandFactory, Parser};
use dockhook_common::config::RelayConfig;
use dockhook_common::constants::{DEFAULT_LOG_FILTER, URL_ENV_VAR};
use dockhook_common::error::DockhookError;
use dockhook_relay::{DockerEventSource, EventSource, HttpWebhook, Notifier, dispatch};
use tracing_subscriber::EnvFilter;

/// dockhook — relay Docker container events to a webhook.
#[derive(Parser, Debug)]
#[command(name = "dockhook", version, about, long_about = None)]
pub struct Cli {
    /// Webhook URL that receives one JSON POST per container event.
    #[arg(short, long, env = URL_ENV_VAR)]
    pub url: Option<String>,

    /// Give up on a webhook request after this many seconds (default: wait indefinitely).
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Emit log lines as JSON.
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    fn webhook_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Writes the usage text, as shown when no webhook URL is given.
fn write_usage(out: &mut impl Write) -> io::Result<()> {
    write!(out, "{}", Cli::command().render_help())
}

fn fatal(err: DockhookError) -> anyhow::Error {
    tracing::error!(error = %err, "fatal");
    err.into()
}

/// Runs the relay until the event stream fails.
///
/// Without a webhook URL, prints usage to stderr and returns successfully.
///
/// # Errors
///
/// Returns an error on invalid configuration, when the runtime cannot be
/// reached, or when the event stream fails or closes.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let Some(url) = cli.webhook_url() else {
        write_usage(&mut io::stderr().lock())?;
        return Ok(());
    };

    let config = RelayConfig::new(url)
        .map_err(fatal)?
        .with_timeout(cli.timeout.map(Duration::from_secs));
    let notifier = Notifier::new(HttpWebhook::new(&config).map_err(fatal)?);

    let source = DockerEventSource::connect().map_err(fatal)?;
    let server = source.server_name().await.map_err(fatal)?;
    tracing::info!(server = %server, "connected to docker api");

    dispatch::run(source.subscribe(), &notifier)
        .await
        .map_err(fatal)
}
