use std::io::IsTerminal;

use anyhow::Result;
use sqlmigrate_config::{LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber. Logs go to stderr; `RUST_LOG` wins over
/// the configured level.
pub fn init(log: &LogConfig, format: Option<LogFormat>, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { log.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("warn,sqlmigrate={level}")))?;

    let ansi = std::io::stderr().is_terminal();
    let registry = tracing_subscriber::registry().with(filter);

    match format.unwrap_or(log.format) {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(ansi)
                    .with_target(false),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}
