use crate::error::ConfigError;
use core_types::ReportPeriod;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

/// Where and how the backend is reached.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL every collection path is appended to (e.g., "http://localhost:5000/api").
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

/// Defaults for the employee report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Period used when no explicit dates or month are requested.
    #[serde(default)]
    pub default_period: ReportPeriod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// A `tracing` filter directive such as "info" or "analytics=debug".
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url must not be empty".to_string(),
            ));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url must be an http(s) URL, got '{base_url}'"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
