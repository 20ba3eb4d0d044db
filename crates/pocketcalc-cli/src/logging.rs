//! Log subscriber setup

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter from `RUST_LOG`, else from the configured verbosity
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_level()))
}

/// Install the global subscriber; logs go to stderr so stdout stays parseable
pub fn init(config: &CliConfig) -> CliResult<()> {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(layer)
        .try_init()
        .map_err(|e| CliError::config(format!("Failed to initialize logging: {e}")))
}
