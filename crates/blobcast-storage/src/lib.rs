#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod azblob;
mod credentials;
mod error;
mod locator;
mod opener;
mod stream;

pub use azblob::{AzureBlobConfig, AzureBlobOpener, DEFAULT_MAX_RETRIES};
pub use credentials::StorageCredentials;
pub use error::{StorageError, StorageResult};
pub use locator::{BlobLocator, DEFAULT_CONTAINER};
pub use opener::BlobStreamOpener;
pub use stream::BlobStream;

/// Tracing target for storage operations.
pub const TRACING_TARGET: &str = "blobcast_storage";
