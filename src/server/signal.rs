// Signal handling module
//
// Supported signals:
// - SIGHUP:  Rebuild notification, fires the generate hook
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

/// Start signal handlers (Unix only)
///
/// Handlers are registered before this returns, so a registration failure is
/// reported to the caller instead of being lost in the background task.
#[cfg(unix)]
pub fn start_signal_handler(state: Arc<AppState>, shutdown: Arc<Notify>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sighup = signal(SignalKind::hangup())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = sighup.recv() => {
                    logger::log_signal("SIGHUP received, treating as rebuild");
                    state.announcer.on_generate();
                }

                _ = sigterm.recv() => {
                    logger::log_signal("SIGTERM received, shutting down");
                    shutdown.notify_one();
                    break;
                }

                _ = sigint.recv() => {
                    logger::log_signal("SIGINT received, shutting down");
                    shutdown.notify_one();
                    break;
                }
            }
        }
    });

    Ok(())
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(_state: Arc<AppState>, shutdown: Arc<Notify>) -> std::io::Result<()> {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_signal("Ctrl+C received, shutting down");
            shutdown.notify_one();
        }
    });

    Ok(())
}
