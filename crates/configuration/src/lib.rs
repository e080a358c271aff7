use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{ApiConfig, Config, LoggingConfig, ReportConfig};

/// File read when no explicit path is given. It is optional.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of environment overrides, e.g. `HARVEST__API__BASE_URL`.
pub const ENV_PREFIX: &str = "HARVEST";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file (required only when
/// `path` is given explicitly), then `HARVEST__*` environment variables. The result
/// is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .set_default("api.base_url", "http://localhost:5000/api")?
        .set_default("api.timeout_secs", 15)?
        .set_default("report.default_period", "this-month")?
        .set_default("logging.level", "info")?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
