//! Bridge from a tokio watch channel into a [`StateStore`].
//!
//! Producers that compute the application state on an async runtime usually
//! hold a `watch::Sender`. The forwarder republishes every value the channel
//! carries so synchronous observers keep a single timeline.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::store::StateStore;

/// Publish the receiver's current value, then every change, until the
/// sender is dropped.
pub async fn forward_watch<S>(mut receiver: watch::Receiver<S>, store: StateStore<S>)
where
    S: Clone + Send + Sync + 'static,
{
    let initial = receiver.borrow_and_update().clone();
    store.publish(initial);

    while receiver.changed().await.is_ok() {
        let next = receiver.borrow_and_update().clone();
        store.publish(next);
    }

    tracing::debug!("State producer closed, forwarder exiting");
}

/// Run [`forward_watch`] on the current tokio runtime.
pub fn spawn_forwarder<S>(receiver: watch::Receiver<S>, store: StateStore<S>) -> JoinHandle<()>
where
    S: Clone + Send + Sync + 'static,
{
    tokio::spawn(forward_watch(receiver, store))
}
