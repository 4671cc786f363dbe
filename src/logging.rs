//! Tracing subscriber setup for the demo binary.

use std::env;
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is unset
    pub default_filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let json = env::var("LOG_FORMAT")
            .map(|v| v.to_lowercase() == "json")
            .unwrap_or(false);

        Self {
            json,
            ..Self::default()
        }
    }
}

/// Install the global subscriber. `log` records from actix are bridged into it.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}
