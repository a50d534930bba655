//! State streams: the input side of the observation core.
//!
//! The external producer owns the application state and publishes every new
//! value into a [`StateStore`]. Observers never see the store directly; they
//! read a [`StateStream`] of the sub-state their screen cares about, usually a
//! [`Scoped`] stream built from a [`Selector`].

mod distinct;
mod forward;
mod subject;
mod subscription;

use std::fmt;
use std::sync::Arc;

pub use distinct::{first_pending, DistinctExt};
pub use forward::{forward_watch, spawn_forwarder};
pub use subject::StateStore;
pub use subscription::{DisposeBag, Subscription};

use crate::ui::mvi::{ScopedState, Selector};

/// Callback invoked with each delivered value.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A replay-latest sequence of values.
///
/// `subscribe` delivers the current value before returning and every later
/// value in order, until the returned [`Subscription`] is disposed.
pub trait StateStream<T>: Send + Sync {
    fn subscribe(&self, listener: Listener<T>) -> Subscription;
}

impl<T, S: StateStream<T> + ?Sized> StateStream<T> for Arc<S> {
    fn subscribe(&self, listener: Listener<T>) -> Subscription {
        (**self).subscribe(listener)
    }
}

/// Stream of the sub-state a [`Selector`] extracts from a [`StateStore`].
///
/// Snapshots for which the selector is out of scope are dropped entirely.
pub struct Scoped<S, T> {
    store: StateStore<S>,
    selector: Selector<S, T>,
}

impl<S, T> Clone for Scoped<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            selector: self.selector.clone(),
        }
    }
}

impl<S, T> fmt::Debug for Scoped<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scoped")
            .field("store", &self.store)
            .field("selector", &self.selector)
            .finish()
    }
}

impl<S: Send + Sync + 'static, T: 'static> Scoped<S, T> {
    pub fn new(store: StateStore<S>, selector: Selector<S, T>) -> Self {
        Self { store, selector }
    }

    /// Evaluate the selector against the store's current snapshot.
    pub fn current(&self) -> ScopedState<T> {
        self.selector.select(&self.store.current())
    }
}

impl<S: Send + Sync + 'static, T: 'static> StateStream<T> for Scoped<S, T> {
    fn subscribe(&self, listener: Listener<T>) -> Subscription {
        let selector = self.selector.clone();
        self.store.subscribe(Arc::new(move |state: &S| {
            if let ScopedState::InScope(scoped) = selector.select(state) {
                listener(&scoped);
            }
        }))
    }
}
