// src/logging.rs

//! Logging setup for `joblaunch` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `JOBLAUNCH_LOG` environment variable, either a bare level ("debug")
//!    or full `EnvFilter` directives ("joblaunch::registry=debug,info")
//! 3. default to `info`
//!
//! Logs go to STDERR so that `build` output on stdout stays pure JSON.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV: &str = "JOBLAUNCH_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(lvl) => EnvFilter::new(directive_for(lvl)),
        None => match std::env::var(LOG_ENV) {
            Ok(raw) if !raw.trim().is_empty() => EnvFilter::try_new(raw.trim())
                .with_context(|| format!("invalid {LOG_ENV} value {raw:?}"))?,
            _ => EnvFilter::new("info"),
        },
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn directive_for(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
