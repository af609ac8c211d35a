//! Server error types with recovery suggestions.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Error type for server startup and runtime failures.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Runtime server error.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Creates a bind error with address context.
    pub fn bind_error(address: impl ToString, source: io::Error) -> Self {
        Self::BindError {
            address: address.to_string(),
            source,
        }
    }

    /// Returns a unique error code for this error type.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::BindError { .. } => "E002",
            Self::Runtime(_) => "E003",
        }
    }

    /// Returns the underlying I/O error kind.
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            Self::BindError { source, .. } => source.kind(),
            Self::Runtime(err) => err.kind(),
        }
    }

    /// Determines if this error might succeed if retried or if the
    /// environment changes (different port, released address).
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::BindError { .. } => matches!(
                self.io_kind(),
                io::ErrorKind::PermissionDenied
                    | io::ErrorKind::AddrInUse
                    | io::ErrorKind::AddrNotAvailable
            ),
            Self::Runtime(_) => matches!(
                self.io_kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
            ),
        }
    }

    /// Provides a human-readable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::BindError { source, .. } => match source.kind() {
                io::ErrorKind::PermissionDenied => Some(
                    "Ports below 1024 need elevated privileges. Run with CAP_NET_BIND_SERVICE or pass --port 8080",
                ),
                io::ErrorKind::AddrInUse => Some(
                    "The port is already in use. Try a different port or stop the conflicting service",
                ),
                io::ErrorKind::AddrNotAvailable => {
                    Some("The address is not available. Check network interface configuration")
                }
                _ => Some("Check network configuration and firewall settings"),
            },
            Self::Runtime(err) => match err.kind() {
                io::ErrorKind::Interrupted => Some("The operation was interrupted, you may retry"),
                io::ErrorKind::TimedOut => {
                    Some("The operation timed out, consider increasing timeout values")
                }
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_unique() {
        let bind_err = ServerError::bind_error("0.0.0.0:80", io::Error::other("test"));
        let runtime_err = ServerError::Runtime(io::Error::other("test"));

        assert_ne!(bind_err.error_code(), runtime_err.error_code());
    }

    #[test]
    fn privileged_port_is_recoverable_with_suggestion() {
        let bind_err = ServerError::bind_error(
            "0.0.0.0:80",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );

        assert!(bind_err.is_recoverable());
        assert!(bind_err.suggestion().is_some_and(|s| s.contains("--port")));
        assert!(bind_err.to_string().contains("0.0.0.0:80"));
    }

    #[test]
    fn generic_runtime_error_is_not_recoverable() {
        let runtime_err = ServerError::Runtime(io::Error::other("test"));

        assert!(!runtime_err.is_recoverable());
        assert!(runtime_err.suggestion().is_none());
    }
}
