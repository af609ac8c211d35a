//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Observability (tracing spans, request IDs, sensitive headers)
//! - Recovery (service errors, panics, timeouts)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use blobcast_server::handler::routes;
//! use blobcast_server::middleware::{
//!     RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt,
//! };
//! use blobcast_server::service::ServiceState;
//!
//! let app: axum::Router = routes()
//!     .with_state(ServiceState::from_env())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```

mod observability;
mod recovery;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
