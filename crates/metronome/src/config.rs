//! Configuration management for the Metronome runtime.
//!
//! This module handles loading and validating the application configuration
//! from a TOML file. Missing files are created with defaults; missing fields
//! fall back to their defaults.

use crate::error::ConfigError;
use metronome_event_system::EventLoopConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

fn default_log_level() -> String {
    "info".to_string()
}

fn default_heartbeat_every_frames() -> u64 {
    30
}

fn default_heartbeat_listener_limit() -> u64 {
    5
}

fn default_report_every_frames() -> u64 {
    150
}

/// Application configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Main loop pacing
    #[serde(default)]
    pub event_loop: EventLoopConfig,
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Built-in demo handlers
    #[serde(default)]
    pub demo: DemoSettings,
}

/// Logging system configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

/// Settings for the demo handlers registered by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoSettings {
    /// Stop after this many frames; 0 runs until interrupted
    #[serde(default)]
    pub max_frames: u64,
    /// Emit a heartbeat event every N frames
    #[serde(default = "default_heartbeat_every_frames")]
    pub heartbeat_every_frames: u64,
    /// The heartbeat listener unregisters itself after this many heartbeats
    #[serde(default = "default_heartbeat_listener_limit")]
    pub heartbeat_listener_limit: u64,
    /// Log frame timing every N frames; 0 disables periodic reports
    #[serde(default = "default_report_every_frames")]
    pub report_every_frames: u64,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            max_frames: 0,
            heartbeat_every_frames: default_heartbeat_every_frames(),
            heartbeat_listener_limit: default_heartbeat_listener_limit(),
            report_every_frames: default_report_every_frames(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `path`, writing a default file if none exists.
    pub async fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            let config: AppConfig = toml::from_str(&content)?;
            info!("📋 Loaded configuration from {}", path.display());
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content)
                .await
                .map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            info!("📝 Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Checks the merged configuration for values the runtime cannot use.
    pub fn validate(&self) -> Result<(), String> {
        self.event_loop.validate()?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        if self.demo.heartbeat_every_frames == 0 {
            return Err("demo.heartbeat_every_frames must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::{NamedTempFile, TempDir};
    use tokio::fs;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.event_loop.target_fps, 30);
        assert!(config.event_loop.overrun_warning);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert_eq!(config.demo.max_frames, 0);
        assert_eq!(config.demo.heartbeat_every_frames, 30);
        assert_eq!(config.demo.heartbeat_listener_limit, 5);
        assert_eq!(config.demo.report_every_frames, 150);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_load_from_nonexistent_file_writes_default() {
        let dir = TempDir::new().unwrap();
        let path: PathBuf = dir.path().join("metronome.toml");

        let config = AppConfig::load_from_file(&path).await.unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        // The written file loads back to the same values
        let reloaded = AppConfig::load_from_file(&path).await.unwrap();
        assert_eq!(reloaded, config);
    }

    #[tokio::test]
    async fn test_load_from_existing_file() {
        let toml_content = r#"
[event_loop]
target_fps = 60

[logging]
level = "debug"
json_format = true

[demo]
max_frames = 90
heartbeat_every_frames = 10
"#;
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), toml_content).await.unwrap();

        let config = AppConfig::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.event_loop.target_fps, 60);
        assert!(config.event_loop.overrun_warning);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
        assert_eq!(config.demo.max_frames, 90);
        assert_eq!(config.demo.heartbeat_every_frames, 10);
        assert_eq!(config.demo.heartbeat_listener_limit, 5);
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_toml() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "[event_loop\ntarget_fps = ").await.unwrap();

        let result = AppConfig::load_from_file(temp_file.path()).await;
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log level"));
    }

    #[test]
    fn test_validation_valid_log_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let mut config = AppConfig::default();
            config.logging.level = level.to_string();
            assert!(config.validate().is_ok(), "level {level} should be valid");
        }
    }

    #[test]
    fn test_validation_zero_fps() {
        let mut config = AppConfig::default();
        config.event_loop.target_fps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_heartbeat_interval() {
        let mut config = AppConfig::default();
        config.demo.heartbeat_every_frames = 0;
        let err = config.validate().unwrap_err();
        assert!(err.contains("heartbeat_every_frames"));
    }
}
