//! Logging setup on top of `tracing-subscriber`

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{TrimSafeError, TrimSafeResult};

/// Valid level names for the `level` setting
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Logging configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Reject unknown level names
    pub fn validate(&self) -> TrimSafeResult<()> {
        let level = self.level.to_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            Ok(())
        } else {
            Err(TrimSafeError::config(format!(
                "Invalid log level: {}. Valid levels: {}",
                self.level,
                LOG_LEVELS.join(", ")
            )))
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr; stdout is reserved for command output. Calling this
/// more than once is harmless.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
