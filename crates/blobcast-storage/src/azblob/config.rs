//! Azure Blob Storage configuration.

use std::fmt;

use url::Url;

use crate::credentials::StorageCredentials;
use crate::error::{StorageError, StorageResult};

/// Number of times a transient request or read failure is retried.
pub const DEFAULT_MAX_RETRIES: usize = 20;

/// Azure Blob Storage configuration for a single container.
#[derive(Clone, PartialEq, Eq)]
pub struct AzureBlobConfig {
    /// Container name.
    pub container: String,
    /// Storage account name.
    pub account_name: String,
    /// Storage account shared key.
    pub account_key: String,
    /// Blob service endpoint override, e.g. an Azurite emulator.
    pub endpoint: Option<String>,
    /// Maximum retries for transient failures.
    pub max_retries: usize,
}

impl AzureBlobConfig {
    /// Creates a new Azure Blob configuration.
    pub fn new(credentials: &StorageCredentials, container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            account_name: credentials.account_name().to_owned(),
            account_key: credentials.account_key().to_owned(),
            endpoint: None,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Sets the blob service endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the maximum number of retries.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Returns the blob service endpoint for the account.
    pub fn endpoint(&self) -> String {
        match self.endpoint {
            Some(ref endpoint) => endpoint.trim_end_matches('/').to_owned(),
            None => format!("https://{}.blob.core.windows.net", self.account_name),
        }
    }

    /// Returns the canonical container address, validating the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Init`] if the endpoint does not form a valid URL.
    pub fn container_url(&self) -> StorageResult<Url> {
        let raw = format!("{}/{}", self.endpoint(), self.container);

        Url::parse(&raw)
            .map_err(|err| StorageError::init(format!("malformed endpoint '{raw}': {err}")))
    }
}

impl fmt::Debug for AzureBlobConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureBlobConfig")
            .field("container", &self.container)
            .field("account_name", &self.account_name)
            .field("account_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}
