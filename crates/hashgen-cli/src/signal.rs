use std::sync::Arc;

use tokio::signal::unix::{SignalKind, signal};

use hashgen_core::HashService;

/// Install a handler that listens for SIGTERM and SIGINT.
///
/// Either signal starts the same drain as `/shutdown`: new submissions are
/// refused and the process exits once in-flight hashes finish.
pub fn install_shutdown_handler(service: Arc<HashService>) -> std::io::Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => {
                tracing::info!("Received SIGTERM, initiating graceful shutdown");
            }
            _ = sigint.recv() => {
                tracing::info!("Received SIGINT, initiating graceful shutdown");
            }
        }

        service.request_shutdown().await;
    });

    Ok(())
}
