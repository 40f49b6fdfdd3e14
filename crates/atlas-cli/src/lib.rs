//! Atlas command-line interface
//!
//! The binary is a thin wrapper: [`run`] loads settings, configures logging
//! and dispatches to [`commands`].

pub mod cli;
pub mod commands;
pub mod output;

use anyhow::Result;
use atlas_config::ConfigLoader;
use cli::Cli;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Install the global subscriber, writing to stderr
///
/// Precedence: `--log-level`/`--verbose`, then `RUST_LOG`, then the settings file.
pub fn init_logging(cli: &Cli, configured_level: &str) {
    let filter = match cli.requested_log_level() {
        Some(level) => EnvFilter::new(LevelFilter::from(level).to_string()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(configured_level)),
    };

    // Ignore the error raised when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load settings, set up logging and run the command
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let loaded = ConfigLoader::load(&cli.vault, cli.config.as_deref())?;
    init_logging(&cli, &loaded.config.logging.level);
    debug!(source = ?loaded.source, vault = %cli.vault.display(), "starting");

    commands::execute(cli, loaded.config).await
}
