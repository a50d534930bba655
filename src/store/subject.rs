//! Replay-latest multicast state subject.
//!
//! [`StateStore`] is the single logical timeline every observer reads from.
//! The external producer calls [`StateStore::publish`]; listeners registered
//! through [`StateStream::subscribe`] receive the current snapshot right away
//! and every later one in publish order.
//!
//! Delivery is synchronous in the context that published. A publish issued
//! from inside a listener (or from another thread while a delivery pass is
//! running) is queued and delivered by the running pass once the current
//! snapshot has reached every listener.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::config::StoreConfig;
use crate::store::subscription::Subscription;
use crate::store::{Listener, StateStream};
use crate::ui::mvi::Selector;

use super::Scoped;

struct Snapshot<S> {
    seq: u64,
    value: Arc<S>,
}

impl<S> Clone for Snapshot<S> {
    fn clone(&self) -> Self {
        Self {
            seq: self.seq,
            value: Arc::clone(&self.value),
        }
    }
}

enum Pending<S> {
    /// A published snapshot for every listener subscribed before it.
    Broadcast(Snapshot<S>),
    /// The current snapshot for one newly subscribed listener.
    Replay { slot: u64, snapshot: Snapshot<S> },
}

struct Slot<S> {
    id: u64,
    /// Sequence number of the snapshot replayed on subscribe.
    since: u64,
    active: Arc<AtomicBool>,
    listener: Listener<S>,
}

impl<S> Slot<S> {
    fn deliver(&self, snapshot: &Snapshot<S>) {
        // Checked at delivery time: a dispose that raced with this pass wins,
        // unless it lands between this check and the call.
        if self.active.load(Ordering::SeqCst) {
            (self.listener)(&snapshot.value);
        }
    }
}

struct StoreState<S> {
    current: Snapshot<S>,
    slots: Vec<Arc<Slot<S>>>,
    pending: VecDeque<Pending<S>>,
    delivering: bool,
    next_slot: u64,
}

struct StoreInner<S> {
    state: Mutex<StoreState<S>>,
    config: StoreConfig,
}

/// Cheap-clone handle to a replay-latest state subject.
pub struct StateStore<S> {
    inner: Arc<StoreInner<S>>,
}

impl<S> Clone for StateStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for StateStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("StateStore")
            .field("seq", &state.current.seq)
            .field("listeners", &state.slots.len())
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl<S: Send + Sync + 'static> StateStore<S> {
    pub fn new(initial: S) -> Self {
        Self::with_config(initial, StoreConfig::default())
    }

    pub fn with_config(initial: S, config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(StoreState {
                    current: Snapshot {
                        seq: 0,
                        value: Arc::new(initial),
                    },
                    slots: Vec::new(),
                    pending: VecDeque::new(),
                    delivering: false,
                    next_slot: 0,
                }),
                config,
            }),
        }
    }

    /// The latest published snapshot.
    pub fn current(&self) -> Arc<S> {
        Arc::clone(&self.inner.state.lock().current.value)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().slots.len()
    }

    /// Replace the current state and deliver it to every listener.
    pub fn publish(&self, next: S) {
        {
            let mut state = self.inner.state.lock();
            let snapshot = Snapshot {
                seq: state.current.seq + 1,
                value: Arc::new(next),
            };
            state.current = snapshot.clone();
            self.enqueue_broadcast(&mut state, snapshot);
            if state.delivering {
                tracing::trace!(
                    seq = state.current.seq,
                    pending = state.pending.len(),
                    "Snapshot queued behind running delivery pass"
                );
                return;
            }
            state.delivering = true;
        }
        self.drain();
    }

    /// Derive a stream of the sub-state picked by `selector`.
    pub fn scoped<T: 'static>(&self, selector: Selector<S, T>) -> Scoped<S, T> {
        Scoped::new(self.clone(), selector)
    }

    fn enqueue_broadcast(&self, state: &mut StoreState<S>, snapshot: Snapshot<S>) {
        let capacity = self.inner.config.pending_capacity.max(1);
        let queued = state
            .pending
            .iter()
            .filter(|item| matches!(item, Pending::Broadcast(_)))
            .count();
        if queued >= capacity {
            if let Some(index) = state
                .pending
                .iter()
                .position(|item| matches!(item, Pending::Broadcast(_)))
            {
                if let Some(Pending::Broadcast(dropped)) = state.pending.remove(index) {
                    tracing::warn!(
                        dropped_seq = dropped.seq,
                        capacity,
                        "Pending snapshot queue full, dropping oldest snapshot"
                    );
                }
            }
        }
        state.pending.push_back(Pending::Broadcast(snapshot));
    }

    /// Deliver queued snapshots until the queue is empty.
    ///
    /// Must only be entered by the caller that flipped `delivering` to true.
    fn drain(&self) {
        let inner = &self.inner;
        // A panicking listener must not leave the store stuck in delivering mode.
        let _unwind = scopeguard::guard_on_unwind((), |()| {
            inner.state.lock().delivering = false;
        });

        loop {
            let (item, slots) = {
                let mut state = inner.state.lock();
                match state.pending.pop_front() {
                    Some(item) => (item, state.slots.clone()),
                    None => {
                        state.delivering = false;
                        break;
                    }
                }
            };

            match item {
                Pending::Broadcast(snapshot) => {
                    for slot in slots.iter().filter(|slot| snapshot.seq > slot.since) {
                        slot.deliver(&snapshot);
                    }
                }
                Pending::Replay { slot, snapshot } => {
                    if let Some(slot) = slots.iter().find(|candidate| candidate.id == slot) {
                        slot.deliver(&snapshot);
                    }
                }
            }
        }
    }
}

impl<S: Send + Sync + 'static> StateStream<S> for StateStore<S> {
    fn subscribe(&self, listener: Listener<S>) -> Subscription {
        let active = Arc::new(AtomicBool::new(true));
        let (id, start_drain) = {
            let mut state = self.inner.state.lock();
            let id = state.next_slot;
            state.next_slot += 1;
            let snapshot = state.current.clone();
            state.slots.push(Arc::new(Slot {
                id,
                since: snapshot.seq,
                active: Arc::clone(&active),
                listener,
            }));
            state.pending.push_back(Pending::Replay { slot: id, snapshot });
            let start_drain = !state.delivering;
            state.delivering = true;
            (id, start_drain)
        };

        if start_drain {
            self.drain();
        }

        let store: Weak<StoreInner<S>> = Arc::downgrade(&self.inner);
        Subscription::new(active, move || {
            if let Some(inner) = store.upgrade() {
                inner.state.lock().slots.retain(|slot| slot.id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording(store: &StateStore<u32>) -> (Arc<Mutex<Vec<u32>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = store.subscribe(Arc::new(move |value: &u32| sink.lock().push(*value)));
        (seen, subscription)
    }

    #[test]
    fn subscribe_replays_current_value() {
        let store = StateStore::new(7u32);
        let (seen, _subscription) = recording(&store);
        assert_eq!(*seen.lock(), vec![7]);
    }

    #[test]
    fn late_subscriber_receives_latest_only() {
        let store = StateStore::new(1u32);
        store.publish(2);
        store.publish(3);
        let (seen, _subscription) = recording(&store);
        store.publish(4);
        assert_eq!(*seen.lock(), vec![3, 4]);
    }

    #[test]
    fn disposed_listener_receives_nothing_more() {
        let store = StateStore::new(0u32);
        let (seen, subscription) = recording(&store);
        subscription.dispose();
        store.publish(1);
        assert_eq!(*seen.lock(), vec![0]);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn reentrant_publish_is_delivered_in_order() {
        let store = StateStore::new(0u32);
        let republisher = store.clone();
        let _bump = store.subscribe(Arc::new(move |value: &u32| {
            if *value == 1 {
                republisher.publish(2);
            }
        }));
        let (seen, _subscription) = recording(&store);

        store.publish(1);

        assert_eq!(*seen.lock(), vec![0, 1, 2]);
        assert_eq!(*store.current(), 2);
    }

    #[test]
    fn dispose_during_pass_skips_remaining_delivery() {
        let store = StateStore::new(0u32);
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let handle = Arc::clone(&victim);
        let _killer = store.subscribe(Arc::new(move |value: &u32| {
            if *value == 1 {
                if let Some(subscription) = handle.lock().as_ref() {
                    subscription.dispose();
                }
            }
        }));
        let (seen, subscription) = recording(&store);
        *victim.lock() = Some(subscription);

        store.publish(1);

        assert_eq!(*seen.lock(), vec![0]);
    }

    #[test]
    fn overflow_drops_oldest_queued_snapshot() {
        let store = StateStore::with_config(0u32, StoreConfig { pending_capacity: 1 });
        let republisher = store.clone();
        let _burst = store.subscribe(Arc::new(move |value: &u32| {
            if *value == 1 {
                republisher.publish(2);
                republisher.publish(3);
            }
        }));
        let (seen, _subscription) = recording(&store);

        store.publish(1);

        assert_eq!(*seen.lock(), vec![0, 1, 3]);
    }

    #[test]
    fn panicking_listener_does_not_wedge_store() {
        let store = StateStore::new(0u32);
        let bomb = store.subscribe(Arc::new(|value: &u32| {
            if *value == 1 {
                panic!("listener failure");
            }
        }));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| store.publish(1)));
        assert!(result.is_err());
        bomb.dispose();

        let (seen, _subscription) = recording(&store);
        store.publish(2);
        assert_eq!(*seen.lock(), vec![1, 2]);
    }
}
