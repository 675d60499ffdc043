//! Main application logic and lifecycle management.
//!
//! `Application` wires the configuration, the signal listener and the demo
//! handlers around one [`EventSystem`] and runs its loop on the calling thread.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::handlers;
use crate::logging::display_banner;
use crate::signals::watch_for_shutdown;
use metronome_event_system::{EventSystem, EventSystemStats, ShutdownState, SystemClock};
use tracing::{error, info};

/// Owns the validated configuration and the runtime used for signals.
pub struct Application {
    config: AppConfig,
    runtime: tokio::runtime::Runtime,
}

impl Application {
    /// Validates `config` and starts the background runtime for signal handling.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::InvalidConfig)?;
        info!("✅ Configuration validated successfully");

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("metronome-signals")
            .enable_all()
            .build()
            .map_err(AppError::Runtime)?;

        Ok(Self { config, runtime })
    }

    /// Builds the event system with every demo handler registered.
    pub fn build_event_system(&self, shutdown_state: &ShutdownState) -> EventSystem {
        let system = EventSystem::with_config(
            self.config.event_loop.clone(),
            Box::new(SystemClock::new()),
        );
        let demo = &self.config.demo;

        system.add_handler(handlers::shutdown_watcher(shutdown_state.clone()));
        system.add_handler(handlers::frame_reporter(demo.report_every_frames));
        system.add_handler(handlers::heartbeat(demo.heartbeat_every_frames));
        if demo.heartbeat_listener_limit > 0 {
            system.add_handler(handlers::heartbeat_listener(demo.heartbeat_listener_limit));
        }
        if demo.max_frames > 0 {
            system.add_handler(handlers::frame_limiter(demo.max_frames));
        }
        system
    }

    /// Runs the event loop until a frame limit or a shutdown signal stops it.
    pub fn run(self) -> Result<(), AppError> {
        display_banner();
        self.log_configuration_summary();

        let shutdown_state = ShutdownState::new();
        self.runtime.spawn(watch_for_shutdown(shutdown_state.clone()));

        let system = self.build_event_system(&shutdown_state);
        info!("✅ Metronome is now running with {} handlers", system.handler_count());
        info!("🛑 Press Ctrl+C to stop");

        system.run();
        shutdown_state.complete_shutdown();

        log_final_statistics(&system.stats(), self.config.logging.json_format);
        system.cleanup();

        self.runtime
            .shutdown_timeout(std::time::Duration::from_millis(100));
        info!("👋 Metronome shutdown complete");
        Ok(())
    }

    fn log_configuration_summary(&self) {
        info!("📋 Configuration Summary:");
        info!("  ⏱️ Target rate: {} fps", self.config.event_loop.target_fps);
        match self.config.demo.max_frames {
            0 => info!("  🔁 Frame limit: none"),
            n => info!("  🔁 Frame limit: {}", n),
        }
        info!(
            "  💓 Heartbeat every {} frames, listener limit {}",
            self.config.demo.heartbeat_every_frames, self.config.demo.heartbeat_listener_limit
        );
    }
}

/// Logs the counters collected by the event system.
fn log_final_statistics(stats: &EventSystemStats, as_json: bool) {
    info!("📊 Final Statistics:");
    info!("  - Frames: {} ({} overran their budget)", stats.frames, stats.overrun_frames);
    info!("  - Events emitted: {}", stats.events_emitted);
    info!("  - Events dispatched: {}", stats.events_dispatched);
    info!("  - Handler invocations: {}", stats.handler_invocations);
    info!(
        "  - Handlers registered/removed: {}/{}",
        stats.handlers_registered, stats.handlers_removed
    );
    info!("  - Time slept: {:.1}ms", stats.total_sleep_ms);

    if as_json {
        match serde_json::to_string(stats) {
            Ok(json) => info!(stats = %json, "final event system statistics"),
            Err(e) => error!("Failed to serialize statistics: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(matches!(Application::new(config), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_build_event_system_registers_demo_handlers() {
        let mut config = AppConfig::default();
        config.demo.max_frames = 3;
        let app = Application::new(config).unwrap();
        let system = app.build_event_system(&ShutdownState::new());

        let names: Vec<String> = system.handlers().map(|h| h.name().to_string()).collect();
        assert_eq!(
            names,
            [
                "shutdown-watcher",
                "frame-reporter",
                "heartbeat",
                "heartbeat-listener",
                "frame-limiter"
            ]
        );
    }

    #[test]
    fn test_unbounded_run_has_no_limiter() {
        let mut config = AppConfig::default();
        config.demo.heartbeat_listener_limit = 0;
        let app = Application::new(config).unwrap();
        let system = app.build_event_system(&ShutdownState::new());
        assert_eq!(system.handler_count(), 3);
    }

    #[test]
    fn test_pre_initiated_shutdown_stops_in_first_frame() {
        let mut config = AppConfig::default();
        config.event_loop.target_fps = 1000;
        let app = Application::new(config).unwrap();
        let shutdown = ShutdownState::new();
        shutdown.initiate_shutdown();

        let system = app.build_event_system(&shutdown);
        system.run();
        assert_eq!(system.stats().frames, 1);
    }
}
