//! Signal handling for graceful shutdown.

use shopstream_core::processors::ShutdownSender;
use tokio::signal::unix::{Signal, SignalKind, signal};
use tokio::task::JoinHandle;

/// Installs SIGTERM and SIGINT handlers and spawns a task that requests
/// shutdown through `shutdown_tx` when either arrives.
///
/// Handlers are installed before this returns, so a failure surfaces at startup.
pub fn install_shutdown_handler(shutdown_tx: ShutdownSender) -> std::io::Result<JoinHandle<()>> {
    let sigterm = signal(SignalKind::terminate())?;
    let sigint = signal(SignalKind::interrupt())?;

    Ok(tokio::spawn(async move {
        shutdown_signal(sigterm, sigint).await;
        // The loop may already have stopped on its own.
        let _ = shutdown_tx.send(true);
    }))
}

/// Completes when a shutdown signal is received.
async fn shutdown_signal(mut sigterm: Signal, mut sigint: Signal) {
    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            tracing::info!("Received SIGINT, initiating graceful shutdown");
        }
    }
}
