//! The seam between request handling and the storage backend.

use async_trait::async_trait;

use crate::credentials::StorageCredentials;
use crate::error::StorageResult;
use crate::locator::BlobLocator;
use crate::stream::BlobStream;

/// Opens a readable byte stream positioned at the start of a blob.
///
/// Implementations must authenticate and connect on every call. On failure
/// no stream is returned, so the caller never holds a half-open connection.
#[async_trait]
pub trait BlobStreamOpener: Send + Sync + 'static {
    /// Opens a stream over the full content of the blob at `locator`.
    async fn open(
        &self,
        credentials: &StorageCredentials,
        locator: &BlobLocator,
    ) -> StorageResult<BlobStream>;
}
