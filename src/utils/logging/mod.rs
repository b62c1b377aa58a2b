//! Logging setup
//!
//! The library only emits `tracing` events. Host applications that do not
//! install their own subscriber can call [`init_logging`] once at startup.

use crate::utils::error::{ClientError, Result};
use tracing_subscriber::EnvFilter;

/// Output format for the global subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Install a global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `default_filter` when it is set.
pub fn init_logging(default_filter: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| {
            ClientError::config(format!("Invalid log filter '{}': {}", default_filter, e))
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| ClientError::internal(format!("Failed to install log subscriber: {}", e)))
}
