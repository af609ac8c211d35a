//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use blobcast_server::handler::routes;
//! use blobcast_server::service::ServiceState;
//!
//! let app: axum::Router = routes().with_state(ServiceState::from_env());
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod monitors;
mod response;
mod videos;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::{ErrorResponse, MonitorStatus, ServiceStatus};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes and a JSON 404 fallback.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(videos::routes())
        .merge(monitors::routes())
        .fallback(handler)
}

#[cfg(test)]
pub(crate) mod test {
    use std::collections::HashMap;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::Router;
    use axum_test::TestServer;
    use blobcast_storage::{
        BlobLocator, BlobStream, BlobStreamOpener, StorageCredentials, StorageError,
        StorageResult,
    };
    use bytes::Bytes;
    use futures::StreamExt;

    use crate::handler::routes;
    use crate::service::{ServiceState, StaticCredentials};

    /// Increments the shared counter when the owning stream is dropped.
    struct ReleaseGuard(Arc<AtomicUsize>);

    impl Drop for ReleaseGuard {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// What the fake backend serves for a given blob path.
    #[derive(Clone)]
    pub enum FakeBlob {
        /// Served in the given chunks.
        Chunks(Vec<Bytes>),
        /// Served in the given chunks, then fails.
        FailAfter(Vec<Bytes>),
    }

    /// An in-memory [`BlobStreamOpener`] recording every call.
    #[derive(Clone, Default)]
    pub struct FakeOpener {
        blobs: Arc<HashMap<String, FakeBlob>>,
        failure: Option<String>,
        opened: Arc<AtomicUsize>,
        released: Arc<AtomicUsize>,
        requests: Arc<Mutex<Vec<(String, String, String)>>>,
    }

    impl FakeOpener {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_blob(self, path: &str, blob: FakeBlob) -> Self {
            let mut blobs = (*self.blobs).clone();
            blobs.insert(path.to_owned(), blob);
            Self {
                blobs: Arc::new(blobs),
                ..self
            }
        }

        pub fn with_bytes(self, path: &str, bytes: &'static [u8]) -> Self {
            self.with_blob(path, FakeBlob::Chunks(vec![Bytes::from_static(bytes)]))
        }

        /// Every open fails with a backend error carrying `description`.
        pub fn failing(description: &str) -> Self {
            Self {
                failure: Some(description.to_owned()),
                ..Self::default()
            }
        }

        pub fn opened(&self) -> usize {
            self.opened.load(Ordering::SeqCst)
        }

        pub fn released(&self) -> usize {
            self.released.load(Ordering::SeqCst)
        }

        /// `(account, container, path)` of every open call.
        pub fn requests(&self) -> Vec<(String, String, String)> {
            self.requests.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl BlobStreamOpener for FakeOpener {
        async fn open(
            &self,
            credentials: &StorageCredentials,
            locator: &BlobLocator,
        ) -> StorageResult<BlobStream> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut requests) = self.requests.lock() {
                requests.push((
                    credentials.account_name().to_owned(),
                    locator.container().to_owned(),
                    locator.path().to_owned(),
                ));
            }

            if let Some(ref description) = self.failure {
                return Err(StorageError::init(description.clone()));
            }

            let blob = self
                .blobs
                .get(locator.path())
                .cloned()
                .ok_or_else(|| StorageError::NotFound(locator.path().to_owned()))?;

            let items: Vec<io::Result<Bytes>> = match blob {
                FakeBlob::Chunks(chunks) => chunks.into_iter().map(Ok).collect(),
                FakeBlob::FailAfter(chunks) => chunks
                    .into_iter()
                    .map(Ok)
                    .chain(Some(Err(io::Error::other("connection reset by peer"))))
                    .collect(),
            };

            let guard = ReleaseGuard(self.released.clone());
            let inner = futures::stream::iter(items).map(move |item| {
                let _guard = &guard;
                item
            });

            Ok(BlobStream::new(locator.clone(), inner))
        }
    }

    pub fn credentials() -> StorageCredentials {
        StorageCredentials::new("testaccount", "dGVzdGtleQ==").unwrap()
    }

    /// State with valid static credentials and the given opener.
    pub fn create_test_state(opener: FakeOpener) -> ServiceState {
        ServiceState::new(StaticCredentials::new(credentials()), opener)
    }

    /// Returns the full router bound to `state`.
    pub fn create_test_router(state: ServiceState) -> Router {
        routes().with_state(state)
    }

    /// Returns a new [`TestServer`] with the given state.
    pub fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let server = TestServer::new(create_test_router(state))?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] backed by `opener` and valid credentials.
    pub fn create_test_server(opener: FakeOpener) -> anyhow::Result<TestServer> {
        create_test_server_with_state(create_test_state(opener))
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server(FakeOpener::new())?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() -> anyhow::Result<()> {
        let server = create_test_server(FakeOpener::new())?;

        let response = server.get("/videos").await;
        response.assert_status_not_found();

        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "not_found");
        Ok(())
    }
}
