//! # dockhook
//!
//! Relays Docker container `start`, `die` and `exec_start` events to a
//! webhook as short chat-style notifications.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

mod cli;

use clap::Parser;

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(cli.log_json);
    cli::execute(cli).await
}
