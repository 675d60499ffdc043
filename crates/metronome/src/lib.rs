//! # Metronome - Application Shell
//!
//! Command-line entry point around the frame-paced event loop. It parses the
//! CLI, loads the TOML configuration, installs logging, registers the demo
//! handlers and runs the loop until a frame limit or a shutdown signal stops it.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run until Ctrl+C with the default configuration
//! metronome
//!
//! # Run 300 frames at 60 fps with debug logging
//! metronome --fps 60 --frames 300 --log-level debug
//!
//! # JSON logging
//! metronome --json-logs
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `metronome.toml` by default. If the file doesn't
//! exist, it is created with default values. CLI flags override the file.

use tracing::error;

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod signals;

pub use app::Application;
pub use cli::CliArgs;
pub use config::{AppConfig, DemoSettings, LoggingSettings};
pub use error::{AppError, ConfigError};

/// Runs the application end to end.
///
/// Configuration problems that prevent logging from starting are returned to
/// the caller; anything after that is logged here before being returned.
pub fn init() -> Result<(), AppError> {
    let args = CliArgs::parse();

    // A small runtime just for the async config load; signals get their own
    // runtime inside the Application.
    let loader = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;
    let loaded = loader.block_on(AppConfig::load_from_file(&args.config_path));
    drop(loader);

    let (mut config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    args.apply_overrides(&mut config);

    logging::setup_logging(&config.logging, args.json_logs)?;

    if let Some(e) = load_error {
        error!("❌ Failed to load configuration: {e}");
        return Err(e.into());
    }

    let result = Application::new(config).and_then(Application::run);
    if let Err(e) = &result {
        error!("❌ Application error: {e}");
    }
    result
}
