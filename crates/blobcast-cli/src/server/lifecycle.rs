//! Startup and exit logging around a running server.

use std::future::Future;
use std::io;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::server::{ServerError, ServerResult};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Awaits `server`, logging when it starts accepting and how long it ran.
///
/// An I/O error from `server` becomes [`ServerError::Runtime`].
pub async fn run_logged<F>(config: &ServerConfig, server: F) -> ServerResult<()>
where
    F: Future<Output = io::Result<()>>,
{
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %config.server_addr(),
        "Accepting connections"
    );
    if config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Listening on every interface"
        );
    }

    let started = Instant::now();
    let result = server.await.map_err(ServerError::Runtime);
    let uptime_secs = started.elapsed().as_secs();

    match result {
        Ok(()) => tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            uptime_secs,
            "Server stopped"
        ),
        Err(ref err) => tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %err,
            code = err.error_code(),
            kind = ?err.io_kind(),
            recoverable = err.is_recoverable(),
            suggestion = err.suggestion().unwrap_or_default(),
            uptime_secs,
            "Server stopped with an error"
        ),
    }

    result
}
