use crate::error::ConfigError;
use crate::settings::LoggingConfig;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "harvest-ledger.log";

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Console output goes to
/// stderr so that report output on stdout stays machine-readable. The returned
/// guard must be held for as long as the file writer should keep flushing.
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| ConfigError::ValidationError(format!("logging.level: {e}")))?,
    };

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    info!(
        level = %config.level,
        directory = ?config.directory,
        "Logging initialized."
    );
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_the_subscriber_only_once() {
        let config = LoggingConfig {
            level: "info".to_string(),
            directory: None,
        };

        assert!(init_tracing(&config).is_ok());
        assert!(matches!(
            init_tracing(&config),
            Err(ConfigError::LoggingError(_))
        ));
    }
}
