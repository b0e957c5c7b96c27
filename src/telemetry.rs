//! Tracing subscriber setup

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.compact().try_init(),
    }
    .map_err(|e| anyhow!("Failed to initialise tracing: {e}"))
}
