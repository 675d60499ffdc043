//! Error types for the Metronome application shell.

use std::path::PathBuf;

/// Failures while loading or writing the TOML configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the configuration file failed
    #[error("Failed to access config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`AppConfig`](crate::config::AppConfig)
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The default configuration could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Merged configuration failed validation
    #[error("Configuration validation failed: {0}")]
    InvalidConfig(String),

    /// The tracing subscriber could not be installed
    #[error("Failed to setup logging: {0}")]
    Logging(String),

    /// The background runtime for signal handling could not start
    #[error("Failed to start signal runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
