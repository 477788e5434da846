//! Logging setup
//!
//! Events go to stderr through a `tracing-subscriber` fmt layer. `RUST_LOG`
//! wins over the configured level when set.

use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// Build the filter from `RUST_LOG`, falling back to the configured level
pub fn build_filter(config: &LogConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("Invalid log level '{}': {}", config.level, e))
}

/// Install the global subscriber
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = build_filter(config)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))?;

    tracing::debug!(level = %config.level, "logging initialised");
    Ok(())
}
