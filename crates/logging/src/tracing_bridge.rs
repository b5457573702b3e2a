//! crates/logging/src/tracing_bridge.rs
//! Subscriber installation for zbuf processes.
//!
//! Events are written to standard error so they never interleave with data
//! streamed to standard output.

use std::io;

use super::config::LogConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable that overrides the configured filter directive.
pub const LOG_ENV_VAR: &str = "ZBUF_LOG";

/// Initialize tracing for the process.
///
/// When `ZBUF_LOG` is set and parses, it replaces the directive derived from
/// `config`. Fails if a global subscriber is already installed.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{LogConfig, init_tracing};
///
/// init_tracing(LogConfig::from_verbose_level(2))?;
/// tracing::info!(target: "zbuf::open", "stream opened");
/// ```
pub fn init_tracing(config: LogConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.ansi)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
}
