//! Storage error types.

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while opening a blob.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to initialize the storage backend (bad endpoint, bad config).
    #[error("storage initialization failed: {0}")]
    Init(String),

    /// Account name or key is missing or empty.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Blob or container not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Permission denied, usually a rejected shared-key signature.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The blob name is empty or cannot be addressed verbatim.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(opendal::Error),
}

impl StorageError {
    /// Creates a new initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Creates a new invalid credentials error.
    pub fn invalid_credentials(msg: impl Into<String>) -> Self {
        Self::InvalidCredentials(msg.into())
    }

    /// Creates a new invalid path error.
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        use opendal::ErrorKind;

        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            ErrorKind::ConfigInvalid => Self::Init(err.to_string()),
            _ => Self::Backend(err),
        }
    }
}
