use std::sync::Arc;

use blobcast_storage::BlobStreamOpener;

use crate::service::{CredentialSource, EnvCredentials, ServiceConfig};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). Holds only
/// shared, immutable collaborators; cloning is cheap.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    credentials: Arc<dyn CredentialSource>,
    opener: Arc<dyn BlobStreamOpener>,
}

impl ServiceState {
    /// Creates state from explicit collaborators.
    pub fn new(credentials: impl CredentialSource, opener: impl BlobStreamOpener) -> Self {
        Self {
            credentials: Arc::new(credentials),
            opener: Arc::new(opener),
        }
    }

    /// Environment credentials and the Azure opener with default settings.
    pub fn from_env() -> Self {
        Self::from_config(&ServiceConfig::default())
    }

    /// Environment credentials and an Azure opener built from `config`.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(EnvCredentials::new(), config.create_opener())
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(credentials: Arc<dyn CredentialSource>);
impl_di!(opener: Arc<dyn BlobStreamOpener>);
