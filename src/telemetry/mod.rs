//! Logging configuration using env_logger.
//!
//! Log lines go to stderr so they never interleave with result tables on
//! stdout. `RUST_LOG` overrides the configured level.

use anyhow::{Result, anyhow};
use log::{Level, LevelFilter, debug, error, info, warn};
use std::sync::Once;

static INIT: Once = Once::new();

/// Log message with context
pub struct LogMessage {
    /// The message to log
    pub message: String,

    /// The module where the log originated
    pub module: &'static str,

    /// Optional key-value pairs of additional context
    pub context: Option<Vec<(&'static str, String)>>,
}

/// Initialize env_logger-based logging with stderr output.
///
/// Only the first call has any effect; later calls return `Ok(())`.
///
/// # Arguments
///
/// * `default_level` - Level used when `RUST_LOG` is not set
pub fn init(default_level: LevelFilter) -> Result<()> {
    let mut result = Ok(());

    INIT.call_once(|| match setup_logger(default_level) {
        Ok(()) => debug!("Logging initialized at {default_level}"),
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            result = Err(e);
        }
    });

    result
}

/// Parses a level name such as `warn` or `DEBUG`.
pub fn parse_level(name: &str) -> Result<LevelFilter> {
    name.trim()
        .parse::<LevelFilter>()
        .map_err(|_| anyhow!("unknown log level {name:?}"))
}

/// Log a message with the given level and context
///
/// # Example
///
/// ```
/// use rowseek::telemetry::{log_with_context, LogMessage};
/// use log::Level;
///
/// log_with_context(
///     Level::Warn,
///     LogMessage {
///         message: "Skipping unreadable dataset".to_string(),
///         module: "search",
///         context: Some(vec![
///             ("file_path", "bases/leak1.csv".to_string()),
///         ]),
///     }
/// );
/// ```
pub fn log_with_context(level: Level, msg: LogMessage) {
    match level {
        Level::Error => error!(target: msg.module, "{}", format_context(&msg)),
        Level::Warn => warn!(target: msg.module, "{}", format_context(&msg)),
        Level::Info => info!(target: msg.module, "{}", format_context(&msg)),
        Level::Debug => debug!(target: msg.module, "{}", format_context(&msg)),
        Level::Trace => log::trace!(target: msg.module, "{}", format_context(&msg)),
    }
}

/// Format a log message with its context for display
pub(crate) fn format_context(msg: &LogMessage) -> String {
    match &msg.context {
        Some(context) if !context.is_empty() => {
            let context_str = context
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(", ");

            format!("{} [{}]", msg.message, context_str)
        }
        _ => msg.message.clone(),
    }
}

fn setup_logger(default_level: LevelFilter) -> Result<()> {
    env_logger::Builder::new()
        .filter(None, default_level)
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .format_target(true)
        .format_module_path(false)
        .try_init()
        .map_err(|e| anyhow!("logger already set: {e}"))
}
