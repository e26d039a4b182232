// ── Reactive entity subscriptions ──
//
// Subscription types for consuming cache changes from the stores.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// An immutable, shared view of a cached listing in server order.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// A subscription to a cached entity listing.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via the `changed()` method or by converting to a `Stream`.
pub struct Subscription<T: Clone + Send + Sync + 'static> {
    current: Snapshot<T>,
    receiver: watch::Receiver<Snapshot<T>>,
}

impl<T: Clone + Send + Sync + 'static> Subscription<T> {
    pub(crate) fn new(receiver: watch::Receiver<Snapshot<T>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation time.
    pub fn current(&self) -> &Snapshot<T> {
        &self.current
    }

    /// Get the latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Snapshot<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` if the owning store has been dropped.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> SubscriptionStream<T> {
        SubscriptionStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields a new snapshot each time the underlying cache is mutated.
pub struct SubscriptionStream<T: Clone + Send + Sync + 'static> {
    inner: WatchStream<Snapshot<T>>,
}

impl<T: Clone + Send + Sync + 'static> Stream for SubscriptionStream<T> {
    type Item = Snapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // WatchStream is Unpin when the inner type is Unpin.
        // Arc<Vec<Arc<T>>> is always Unpin, so this is safe.
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
