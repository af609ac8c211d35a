//! Centralized tracing target constants for structured logging.
//!
//! Using consistent targets enables fine-grained control over log output
//! via tracing subscriber filters, e.g.
//! `RUST_LOG=blobcast_server::handler::videos=debug`.

/// Video streaming requests.
pub const TRACING_TARGET_VIDEOS: &str = "blobcast_server::handler::videos";

/// Health check requests.
pub const TRACING_TARGET_MONITORS: &str = "blobcast_server::handler::monitors";

/// Credential resolution.
pub const TRACING_TARGET_CREDENTIALS: &str = "blobcast_server::credentials";

/// Error recovery including middleware errors and request timeouts.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "blobcast_server::recovery::error";

/// Panic recovery in handlers.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "blobcast_server::recovery::panic";
