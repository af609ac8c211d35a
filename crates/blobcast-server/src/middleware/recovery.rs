//! Turns timeouts, panics and tower errors into JSON 500 responses.
//!
//! The timeout covers the handler only. On the video route that means until
//! the response headers are ready; a body that has started streaming is
//! never cut off.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::{Error, ErrorKind};
use crate::tracing_targets::{TRACING_TARGET_RECOVERY_ERROR, TRACING_TARGET_RECOVERY_PANIC};

/// Handler time limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds a handler may take to produce response headers.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value = "30")
    )]
    pub request_timeout: u64,
}

impl RecoveryConfig {
    /// Limits handlers to `secs` seconds.
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            request_timeout: secs,
        }
    }

    #[inline]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self::with_timeout_secs(30)
    }
}

/// Adds recovery layers to an `axum::`[`Router`].
pub trait RouterRecoveryExt<S> {
    /// Wraps every route in panic, timeout and service-error recovery.
    fn with_recovery(self, config: &RecoveryConfig) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        self.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(service_error))
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(TimeoutLayer::new(config.request_timeout())),
        )
    }
}

async fn service_error(err: tower::BoxError) -> Response {
    tracing::error!(
        target: TRACING_TARGET_RECOVERY_ERROR,
        error = %err,
        "Request failed in middleware"
    );

    let detail = if err.is::<Elapsed>() {
        "Request timeout".to_owned()
    } else {
        err.to_string()
    };

    ErrorKind::InternalServerError
        .with_message(detail)
        .into_response()
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    if let Some(error) = payload.downcast_ref::<Error<'static>>() {
        tracing::error!(
            target: TRACING_TARGET_RECOVERY_PANIC,
            error = %error,
            "Handler panicked"
        );
        return error.clone().into_response();
    }

    let message = match payload.downcast_ref::<String>() {
        Some(message) => message.as_str(),
        None => payload.downcast_ref::<&str>().copied().unwrap_or("non-string payload"),
    };
    tracing::error!(
        target: TRACING_TARGET_RECOVERY_PANIC,
        panic = %message,
        "Handler panicked"
    );

    ErrorKind::InternalServerError
        .with_message("Handler panicked")
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "late"
    }

    async fn panics() -> &'static str {
        panic!("handler exploded")
    }

    async fn panics_with_error() -> &'static str {
        std::panic::panic_any(ErrorKind::StorageFailure.with_message("boom"))
    }

    fn server(config: &RecoveryConfig) -> anyhow::Result<TestServer> {
        let router = Router::new()
            .route("/slow", get(slow))
            .route("/panic", get(panics))
            .route("/typed-panic", get(panics_with_error))
            .with_recovery(config);

        Ok(TestServer::new(router)?)
    }

    #[test]
    fn default_timeout_is_thirty_seconds() {
        assert_eq!(
            RecoveryConfig::default().request_timeout(),
            Duration::from_secs(30)
        );
    }

    #[tokio::test]
    async fn slow_handler_times_out_with_json_body() -> anyhow::Result<()> {
        let server = server(&RecoveryConfig::with_timeout_secs(0))?;

        let response = server.get("/slow").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Internal server error: Request timeout");
        Ok(())
    }

    #[tokio::test]
    async fn string_panic_becomes_internal_server_error() -> anyhow::Result<()> {
        let server = server(&RecoveryConfig::default())?;

        let response = server.get("/panic").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "internal_server_error");
        Ok(())
    }

    #[tokio::test]
    async fn error_panic_keeps_its_kind() -> anyhow::Result<()> {
        let server = server(&RecoveryConfig::default())?;

        let response = server.get("/typed-panic").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "storage_failure");
        Ok(())
    }
}
