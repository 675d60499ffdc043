//! Logging system setup and configuration.
//!
//! Initializes the tracing-based logging system with either human-readable or
//! JSON output.

use crate::config::LoggingSettings;
use crate::error::AppError;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG`, when set, takes precedence over `config.level`. JSON output is
/// used when either the config or `json_format` asks for it.
pub fn setup_logging(config: &LoggingSettings, json_format: bool) -> Result<(), AppError> {
    let log_level = config.level.as_str();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if json_format || config.json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(false)
                    .with_line_number(false)
                    .with_thread_names(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_file(false)
                    .with_line_number(false)
                    .with_target(false),
            )
            .try_init()
    };
    result.map_err(|e| AppError::Logging(e.to_string()))?;

    info!("🔧 Logging initialized with level: {}", log_level);
    Ok(())
}

/// Logs the startup banner.
pub fn display_banner() {
    let version = option_env!("CARGO_PKG_VERSION").unwrap_or("UNK");
    info!("╔══════════════════════════════════════════╗");
    info!("║              🎵 METRONOME 🎵             ║");
    info!("║   Frame-paced event loop runtime v{:<6} ║", version);
    info!("║                                          ║");
    info!("║  🔁 Start / Update / Exit lifecycle      ║");
    info!("║  📬 FIFO queue, ordered broadcast        ║");
    info!("║  🧵 Single-threaded, cooperative         ║");
    info!("╚══════════════════════════════════════════╝");
}
