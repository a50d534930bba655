//! Cancellation handles for state stream listeners.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

type Cancel = Box<dyn FnOnce() + Send>;

/// Handle to a live listener on a state stream.
///
/// Disposing is idempotent. The listener is marked inactive before it is
/// unregistered, so a delivery that was already scheduled when `dispose`
/// ran is skipped rather than invoked. Dropping the handle disposes it.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    active: Arc<AtomicBool>,
    cancel: Mutex<Option<Cancel>>,
}

impl Subscription {
    pub(crate) fn new(active: Arc<AtomicBool>, cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            active,
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// Cancel the listener. Safe to call any number of times.
    ///
    /// Returning does not wait for a delivery running on another thread: a
    /// listener call that already passed the active check can still complete
    /// after this returns. Disposing from the delivering thread, including
    /// from inside a listener, suppresses every later call.
    pub fn dispose(&self) {
        self.active.store(false, Ordering::SeqCst);
        let cancel = self.cancel.lock().take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    pub fn is_disposed(&self) -> bool {
        !self.active.load(Ordering::SeqCst)
    }

    /// Hand ownership to a [`DisposeBag`].
    pub fn disposed_by(self, bag: &mut DisposeBag) {
        bag.insert(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Scoped collection of subscriptions released together.
///
/// Everything still held is disposed when the bag is dropped.
#[derive(Debug, Default)]
pub struct DisposeBag {
    subscriptions: Vec<Subscription>,
}

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Dispose every held subscription and empty the bag.
    pub fn dispose(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.dispose();
        }
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Move every subscription out of `other` into this bag.
    pub fn append(&mut self, other: &mut DisposeBag) {
        self.subscriptions.append(&mut other.subscriptions);
    }
}
