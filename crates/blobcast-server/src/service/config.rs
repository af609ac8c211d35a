use blobcast_storage::{AzureBlobOpener, DEFAULT_MAX_RETRIES};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// App [`state`] configuration.
///
/// Storage credentials are deliberately absent: they are resolved from the
/// environment on every request.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Overrides the blob service endpoint (e.g. an Azurite emulator).
    /// Defaults to `https://{account}.blob.core.windows.net`.
    #[cfg_attr(feature = "config", arg(long, env = "STORAGE_ENDPOINT"))]
    pub storage_endpoint: Option<String>,

    /// Maximum transport-level retries for a blob read.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "STORAGE_MAX_RETRIES", default_value_t = DEFAULT_MAX_RETRIES)
    )]
    pub storage_max_retries: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            storage_endpoint: None,
            storage_max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ServiceConfig {
    /// Sets a custom blob service endpoint.
    pub fn with_storage_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.storage_endpoint = Some(endpoint.into());
        self
    }

    /// Builds the blob opener described by this configuration.
    pub fn create_opener(&self) -> AzureBlobOpener {
        let opener = AzureBlobOpener::new().with_max_retries(self.storage_max_retries);
        match &self.storage_endpoint {
            Some(endpoint) => opener.with_endpoint(endpoint.clone()),
            None => opener,
        }
    }
}
