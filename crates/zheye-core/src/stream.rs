// ── State subscriptions ──
//
// Subscription type for consuming store changes.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::state::StoreState;

/// A subscription to the store's state.
///
/// Provides both point-in-time snapshot access and change notification via
/// `changed()` or by converting into a `Stream`.
pub struct StateStream {
    current: Arc<StoreState>,
    receiver: watch::Receiver<Arc<StoreState>>,
}

impl StateStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<StoreState>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Snapshot captured at creation time, or at the last `changed()`.
    pub fn current(&self) -> &Arc<StoreState> {
        &self.current
    }

    /// Latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Arc<StoreState> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next committed mutation, returning the new snapshot.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<StoreState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    ///
    /// The stream yields the current snapshot first, then one item per
    /// observed change.
    pub fn into_stream(self) -> StateWatchStream {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct StateWatchStream {
    inner: WatchStream<Arc<StoreState>>,
}

impl Stream for StateWatchStream {
    type Item = Arc<StoreState>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
