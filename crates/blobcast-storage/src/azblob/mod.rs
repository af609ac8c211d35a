//! Azure Blob Storage backend.

mod config;
mod opener;

pub use config::{AzureBlobConfig, DEFAULT_MAX_RETRIES};
pub use opener::AzureBlobOpener;
