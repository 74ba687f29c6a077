//! Configuration for the provider.

use std::path::PathBuf;

/// Provider runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit ISO encoder binary, bypassing PATH discovery.
    pub iso_tool: Option<PathBuf>,

    /// Log level hint (trace, debug, info, warn, error) for hosts that
    /// install a tracing subscriber.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let iso_tool = std::env::var("UNATTEND_ISO_TOOL").ok().map(PathBuf::from);

        let log_level = std::env::var("UNATTEND_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            iso_tool,
            log_level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iso_tool: None,
            log_level: "info".to_string(),
        }
    }
}
