// src/logging.rs

//! Logging setup for `autobuild` using `tracing` + `tracing-subscriber`.
//!
//! The log level comes from the `AUTOBUILD_LOG` environment variable
//! (e.g. "info", "debug") and defaults to `info`.
//!
//! Diagnostics are sent to STDERR. The build report (targets, build
//! announcements, success lines and error blocks) is written to STDOUT by
//! [`crate::exec::Console`], so the two never mix.

use anyhow::Result;
use tracing_subscriber::fmt;

/// Environment variable consulted for the log level.
pub const LOG_ENV_VAR: &str = "AUTOBUILD_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging() -> Result<()> {
    let level = std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|s| parse_level_str(&s))
        .unwrap_or(tracing::Level::INFO);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))?;

    Ok(())
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels_case_insensitively() {
        assert_eq!(parse_level_str("DEBUG"), Some(tracing::Level::DEBUG));
        assert_eq!(parse_level_str(" warning "), Some(tracing::Level::WARN));
        assert_eq!(parse_level_str("trace"), Some(tracing::Level::TRACE));
    }

    #[test]
    fn unknown_level_falls_through() {
        assert_eq!(parse_level_str("verbose"), None);
        assert_eq!(parse_level_str(""), None);
    }
}
