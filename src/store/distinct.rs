//! Deduplicating subscriptions.
//!
//! Every observer facet is wired the same way: extract a field from the
//! scoped state, drop values equal to the previously delivered one, forward
//! the rest. Equality is structural (`PartialEq`), never identity.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::store::{StateStream, Subscription};
use crate::ui::mvi::UiState;

/// Deduplicating subscription operators for any [`StateStream`].
pub trait DistinctExt<T>: StateStream<T> {
    /// Deliver `extract(value)` on subscribe and afterwards only when it
    /// differs from the last delivered value.
    fn subscribe_distinct<V, F, C>(&self, extract: F, on_change: C) -> Subscription
    where
        T: 'static,
        V: UiState,
        F: Fn(&T) -> V + Send + Sync + 'static,
        C: Fn(V) + Send + Sync + 'static,
    {
        self.subscribe_distinct_present(move |value| Some(extract(value)), on_change)
    }

    /// Like [`subscribe_distinct`](DistinctExt::subscribe_distinct), but
    /// absent values are filtered out before comparison and never delivered.
    ///
    /// The comparison baseline is the last delivered present value, so a
    /// value that disappears and comes back unchanged is not delivered again.
    fn subscribe_distinct_present<V, F, C>(&self, extract: F, on_change: C) -> Subscription
    where
        T: 'static,
        V: UiState,
        F: Fn(&T) -> Option<V> + Send + Sync + 'static,
        C: Fn(V) + Send + Sync + 'static,
    {
        let last: Mutex<Option<V>> = Mutex::new(None);
        self.subscribe(Arc::new(move |value: &T| {
            let Some(next) = extract(value) else {
                return;
            };
            {
                let mut last = last.lock();
                if last.as_ref() == Some(&next) {
                    return;
                }
                *last = Some(next.clone());
            }
            on_change(next);
        }))
    }
}

impl<T, S: StateStream<T> + ?Sized> DistinctExt<T> for S {}

/// The oldest pending message, if any.
///
/// Only the head of the pending sequence is surfaced per snapshot.
pub fn first_pending<M: Clone>(pending: &[M]) -> Option<M> {
    pending.first().cloned()
}
