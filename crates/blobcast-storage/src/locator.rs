//! Blob addressing within a storage account.

use std::fmt;

use crate::error::{StorageError, StorageResult};

/// Container that videos are served from.
pub const DEFAULT_CONTAINER: &str = "videos";

/// Identifies a single blob: a container and a path inside it.
///
/// The path is kept verbatim, exactly as the client supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobLocator {
    container: String,
    path: String,
}

impl BlobLocator {
    /// Creates a new locator.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidPath`] if the container or path is empty.
    pub fn new(container: impl Into<String>, path: impl Into<String>) -> StorageResult<Self> {
        let container = container.into();
        let path = path.into();

        if container.is_empty() {
            return Err(StorageError::invalid_path("container name is empty"));
        }

        if path.is_empty() {
            return Err(StorageError::invalid_path("blob path is empty"));
        }

        Ok(Self { container, path })
    }

    /// Creates a locator for a blob in [`DEFAULT_CONTAINER`].
    pub fn in_default_container(path: impl Into<String>) -> StorageResult<Self> {
        Self::new(DEFAULT_CONTAINER, path)
    }

    /// Returns the container name.
    #[inline]
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Returns the blob path within the container.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for BlobLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.path)
    }
}
