//! Signal handling for graceful loop shutdown.
//!
//! The event loop runs on the main thread and never awaits anything, so
//! signals are received on a small background tokio runtime instead. The
//! first signal flips the shared [`ShutdownState`]; a handler inside the loop
//! sees it on the next update and requests exit. A second signal exits the
//! process immediately, unless the loop has already stopped and only the
//! final cleanup is left.

use metronome_event_system::ShutdownState;
use tokio::signal;
use tracing::{error, info, warn};

/// Waits for one termination signal (SIGINT/SIGTERM on Unix, Ctrl+C on Windows).
pub async fn wait_for_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => (),
            _ = sigterm.recv() => ()
        }
    }

    #[cfg(windows)]
    signal::ctrl_c().await?;

    Ok(())
}

/// Flips `shutdown_state` on the first signal and force-exits on the second.
pub async fn watch_for_shutdown(shutdown_state: ShutdownState) {
    if let Err(e) = wait_for_signal().await {
        error!("Failed to set up shutdown signal handler: {e}");
        return;
    }
    info!("📡 Received shutdown signal - initiating graceful shutdown");
    shutdown_state.initiate_shutdown();

    // merciless shutdown
    if wait_for_signal().await.is_ok() {
        if should_force_exit(&shutdown_state) {
            warn!("Shutdown signal received again! I'll make this quick.");
            std::process::exit(1);
        }
        info!("📡 Repeated signal ignored, the loop has already stopped");
    }
}

/// Whether a repeated signal should kill the process instead of waiting.
pub fn should_force_exit(shutdown_state: &ShutdownState) -> bool {
    !shutdown_state.is_shutdown_complete()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_signal_forces_exit_while_loop_runs() {
        let state = ShutdownState::new();
        state.initiate_shutdown();
        assert!(should_force_exit(&state));
    }

    #[test]
    fn test_repeated_signal_waits_for_cleanup_after_loop_stops() {
        let state = ShutdownState::new();
        state.initiate_shutdown();
        state.complete_shutdown();
        assert!(!should_force_exit(&state));
    }
}
