//! Plain HTTP listener with bounded graceful shutdown.

use std::future::IntoFuture;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;
use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;
use crate::server::lifecycle::run_logged;
use crate::server::{ServerError, ServerResult, shutdown_signal};

/// Binds the configured address and serves `app` over HTTP.
///
/// After a shutdown signal the listener stops accepting connections and
/// in-flight requests get up to the shutdown timeout to finish; streams
/// still open after that are dropped.
pub async fn serve_http(app: Router, server_config: &ServerConfig) -> ServerResult<()> {
    let server_addr = server_config.server_addr();

    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "Failed to bind to address"
        );

        ServerError::bind_error(server_addr, err)
    })?;

    let shutdown_timeout = server_config.shutdown_timeout();
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();

    let graceful = async move {
        shutdown_signal().await;
        let _ = signalled_tx.send(());
    };

    let deadline = async move {
        if signalled_rx.await.is_err() {
            std::future::pending::<()>().await;
        }

        tokio::time::sleep(shutdown_timeout).await;
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(graceful)
        .into_future();

    run_logged(server_config, async move {
        tokio::select! {
            result = server => result,
            () = deadline => {
                tracing::warn!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    timeout_secs = shutdown_timeout.as_secs(),
                    "Shutdown timeout elapsed, dropping in-flight requests"
                );
                Ok(())
            }
        }
    })
    .await
}
