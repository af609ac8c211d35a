//! Shutdown signal.

use tokio::signal;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Resolves on the first Ctrl+C or, on Unix, SIGTERM.
///
/// A signal whose handler cannot be installed is logged and never fires.
pub async fn shutdown_signal() {
    let interrupt = async {
        match signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(err) => never(err, "SIGINT").await,
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                "SIGTERM"
            }
            Err(err) => never(err, "SIGTERM").await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&str>();

    let received = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        signal = received,
        "Shutting down gracefully"
    );
}

async fn never(err: std::io::Error, name: &str) -> &'static str {
    tracing::error!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        signal = name,
        error = %err,
        "Cannot listen for signal"
    );
    std::future::pending().await
}
