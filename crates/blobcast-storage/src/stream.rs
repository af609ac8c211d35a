//! Owned byte stream over a single blob.

use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::{BoxStream, Stream, StreamExt};

use crate::TRACING_TARGET;
use crate::locator::BlobLocator;

/// An open, ordered stream of chunks from one blob.
///
/// The stream owns the underlying backend connection. Dropping it releases
/// the connection, whether the stream was fully read, failed partway, or was
/// abandoned by a disconnecting client.
pub struct BlobStream {
    inner: BoxStream<'static, io::Result<Bytes>>,
    locator: BlobLocator,
    bytes_read: u64,
    finished: bool,
    failed: bool,
}

impl BlobStream {
    /// Wraps a chunk stream read from the blob at `locator`.
    pub fn new<S>(locator: BlobLocator, inner: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Self {
            inner: inner.boxed(),
            locator,
            bytes_read: 0,
            finished: false,
            failed: false,
        }
    }
}

impl Stream for BlobStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        match this.inner.poll_next_unpin(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                this.bytes_read += chunk.len() as u64;
                Poll::Ready(Some(Ok(chunk)))
            }
            Poll::Ready(Some(Err(err))) => {
                this.failed = true;
                tracing::warn!(
                    target: TRACING_TARGET,
                    blob = %this.locator,
                    bytes_read = this.bytes_read,
                    error = %err,
                    "Blob stream failed mid-read"
                );
                Poll::Ready(Some(Err(err)))
            }
            Poll::Ready(None) => {
                this.finished = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl Drop for BlobStream {
    fn drop(&mut self) {
        tracing::debug!(
            target: TRACING_TARGET,
            blob = %self.locator,
            bytes_read = self.bytes_read,
            finished = self.finished,
            failed = self.failed,
            "Blob stream released"
        );
    }
}

impl fmt::Debug for BlobStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobStream")
            .field("locator", &self.locator)
            .field("bytes_read", &self.bytes_read)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::TryStreamExt;

    use super::*;

    struct ReleaseCounter(Arc<AtomicUsize>);

    impl Drop for ReleaseCounter {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn locator() -> BlobLocator {
        BlobLocator::in_default_container("a/b.mp4").unwrap()
    }

    #[tokio::test]
    async fn yields_chunks_in_order() {
        let chunks = vec![
            Ok(Bytes::from_static(b"first ")),
            Ok(Bytes::from_static(b"second ")),
            Ok(Bytes::from_static(b"third")),
        ];
        let mut stream = BlobStream::new(locator(), futures::stream::iter(chunks));

        let mut collected = Vec::new();
        while let Some(chunk) = stream.try_next().await.unwrap() {
            collected.extend_from_slice(&chunk);
        }

        assert_eq!(collected, b"first second third");
        assert_eq!(stream.bytes_read, 18);
    }

    #[tokio::test]
    async fn empty_stream_ends_immediately() {
        let mut stream = BlobStream::new(locator(), futures::stream::empty::<io::Result<Bytes>>());
        assert!(stream.next().await.is_none());
        assert!(stream.finished);
    }

    #[tokio::test]
    async fn inner_stream_is_released_once_after_failure() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = ReleaseCounter(released.clone());
        let chunks = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
        ];
        let inner = futures::stream::iter(chunks).map(move |chunk| {
            let _counter = &counter;
            chunk
        });

        let mut stream = BlobStream::new(locator(), inner);
        assert!(stream.next().await.unwrap().is_ok());
        assert!(stream.next().await.unwrap().is_err());
        assert_eq!(stream.bytes_read, 7);
        assert!(stream.failed);
        assert_eq!(released.load(Ordering::SeqCst), 0);

        drop(stream);
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }
}
