//! Liveness endpoint.

use axum::routing::get;
use axum::{Json, Router};

use crate::handler::MonitorStatus;
use crate::service::ServiceState;
use crate::tracing_targets::TRACING_TARGET_MONITORS as TRACING_TARGET;

/// Reports that the process is up. Does not touch the storage backend.
async fn health_status() -> Json<MonitorStatus> {
    tracing::trace!(target: TRACING_TARGET, "Health status check requested");
    Json(MonitorStatus::default())
}

/// Returns a [`Router`] with the health route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}
