//! Azure blob stream opener built on OpenDAL.

use std::io;

use async_trait::async_trait;
use futures::TryStreamExt;
use opendal::layers::RetryLayer;
use opendal::raw::oio::Read;
use opendal::raw::{Access, OpRead, normalize_path};
use opendal::{Operator, services};

use super::config::{AzureBlobConfig, DEFAULT_MAX_RETRIES};
use crate::TRACING_TARGET;
use crate::credentials::StorageCredentials;
use crate::error::{StorageError, StorageResult};
use crate::locator::BlobLocator;
use crate::opener::BlobStreamOpener;
use crate::stream::BlobStream;

/// Opens blob streams against Azure Blob Storage with shared-key signing.
///
/// Holds no connection state: each [`open`] call builds a fresh operator
/// from the supplied credentials and issues a single download request.
/// Backend failures surface from [`open`]; only transport failures after
/// the response headers arrive show up inside the stream.
///
/// [`open`]: BlobStreamOpener::open
#[derive(Debug, Clone)]
pub struct AzureBlobOpener {
    endpoint: Option<String>,
    max_retries: usize,
}

impl AzureBlobOpener {
    /// Creates an opener for the public Azure endpoint.
    pub fn new() -> Self {
        Self {
            endpoint: None,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Overrides the blob service endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the maximum number of retries for transient failures.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Returns the configuration used to reach `container` with `credentials`.
    pub fn config(&self, credentials: &StorageCredentials, container: &str) -> AzureBlobConfig {
        let config =
            AzureBlobConfig::new(credentials, container).with_max_retries(self.max_retries);

        match self.endpoint {
            Some(ref endpoint) => config.with_endpoint(endpoint),
            None => config,
        }
    }

    /// Creates an OpenDAL operator for the configured container.
    fn create_operator(config: &AzureBlobConfig) -> StorageResult<Operator> {
        // Validates the endpoint before OpenDAL sees it.
        config.container_url()?;

        let builder = services::Azblob::default()
            .container(&config.container)
            .endpoint(&config.endpoint())
            .account_name(&config.account_name)
            .account_key(&config.account_key);

        let retry = RetryLayer::new()
            .with_max_times(config.max_retries)
            .with_jitter();

        Operator::new(builder)
            .map(|op| op.layer(retry).finish())
            .map_err(|e| StorageError::init(e.to_string()))
    }
}

/// Returns the blob name when OpenDAL would address it exactly as given.
///
/// Names ending in `/` are directories to OpenDAL, and names with leading,
/// doubled or surrounding separators and whitespace would be rewritten.
fn verbatim_path(locator: &BlobLocator) -> StorageResult<&str> {
    let path = locator.path();

    if path.ends_with('/') {
        return Err(StorageError::invalid_path(format!(
            "'{path}' names a directory, not a blob"
        )));
    }

    if normalize_path(path) != path {
        return Err(StorageError::invalid_path(format!(
            "'{path}' is not a canonical blob name"
        )));
    }

    Ok(path)
}

impl Default for AzureBlobOpener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStreamOpener for AzureBlobOpener {
    async fn open(
        &self,
        credentials: &StorageCredentials,
        locator: &BlobLocator,
    ) -> StorageResult<BlobStream> {
        let path = verbatim_path(locator)?;
        let config = self.config(credentials, locator.container());
        let operator = Self::create_operator(&config)?;

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %config.endpoint(),
            container = %locator.container(),
            path = %path,
            max_retries = config.max_retries,
            "Opening blob stream"
        );

        let (_, reader) = operator.into_inner().read(path, OpRead::new()).await?;

        let chunks = futures::stream::try_unfold(reader, |mut reader| async move {
            let buffer = reader.read().await?;
            if buffer.is_empty() {
                return Ok(None);
            }

            Ok::<_, opendal::Error>(Some((buffer.to_bytes(), reader)))
        })
        .map_err(io::Error::from);

        tracing::debug!(target: TRACING_TARGET, blob = %locator, "Blob stream opened");
        Ok(BlobStream::new(locator.clone(), chunks))
    }
}
