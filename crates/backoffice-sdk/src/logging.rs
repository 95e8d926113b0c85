//! Log output setup.
//!
//! The crates below the SDK only emit `tracing` events; this module installs
//! the subscriber that prints them.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON format (for log aggregation).
    Json,
    /// Human-readable format (for development).
    #[default]
    Human,
}

/// Logging settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    format: LogFormat,
    level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Human,
            level: "info".to_string(),
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Directive used when `RUST_LOG` is not set, e.g. `backoffice_data=debug`.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// The filter to install: `RUST_LOG` if set, else the configured level.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Install the global subscriber.
    ///
    /// Fails if one is already installed.
    pub fn init(&self) -> Result<()> {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.filter())
            .with_target(true);

        match self.format {
            LogFormat::Json => builder
                .json()
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e)),
            LogFormat::Human => builder
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e)),
        }
    }
}

/// Install human-readable logging at `info`.
pub fn init() -> Result<()> {
    LogConfig::default().init()
}
