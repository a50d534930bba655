//! Observer lifecycle engine.
//!
//! ```text
//!            start_observing (responder attached)
//!   Idle ───────────────────────────────────────→ Observing
//!    ↑                                                │
//!    └──── stop_observing / detach / responder gone ──┘
//! ```
//!
//! The observer never owns its responder. It keeps a `Weak` reference and
//! checks both the observing flag and the responder at delivery time, so a
//! callback scheduled before `stop_observing` never reaches the responder.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};

use crate::store::DisposeBag;
use crate::ui::observer::{Observer, Wiring};

/// Facet delivery path handed to a [`Wiring`].
///
/// Cloned into each subscription callback. Holds only weak references, so
/// live subscriptions never keep the observer or the responder alive.
pub struct Delivery<R: ?Sized> {
    gate: Weak<dyn Gate<R>>,
}

impl<R: ?Sized> Clone for Delivery<R> {
    fn clone(&self) -> Self {
        Self {
            gate: Weak::clone(&self.gate),
        }
    }
}

impl<R: ?Sized> fmt::Debug for Delivery<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delivery")
            .field("connected", &(self.gate.strong_count() > 0))
            .finish()
    }
}

impl<R: ?Sized> Delivery<R> {
    /// Hand a value for `facet` to the responder, if the observer is still
    /// observing and the responder is still alive.
    ///
    /// The check runs immediately before the call. A `stop_observing` issued
    /// on another thread while a delivery is already past the check does not
    /// wait for it, so that one delivery may still land after `stop_observing`
    /// returns. On the delivering thread a stop always wins.
    pub fn send(&self, facet: &'static str, deliver: impl FnOnce(&R)) {
        let Some(gate) = self.gate.upgrade() else {
            tracing::trace!(facet, "Observer released, delivery dropped");
            return;
        };
        match gate.open(facet) {
            Some(responder) => deliver(responder.as_ref()),
            None => tracing::trace!(facet, "Observer idle, delivery dropped"),
        }
    }
}

/// Delivery-time check implemented by the observer's shared state.
trait Gate<R: ?Sized>: Send + Sync {
    fn open(&self, facet: &'static str) -> Option<Arc<R>>;
}

struct Shared<W: Wiring> {
    label: &'static str,
    wiring: W,
    responder: RwLock<Option<Weak<W::Responder>>>,
    /// Bumped on every responder assignment; lets stale attachments detect
    /// that they no longer own the slot.
    generation: AtomicU64,
    observing: AtomicBool,
    bag: Mutex<DisposeBag>,
    /// Serialises start and stop. Reentrant so a responder may stop the
    /// observer from a callback replayed while it is starting.
    lifecycle: ReentrantMutex<()>,
}

impl<W: Wiring> Shared<W> {
    fn current_responder(&self) -> Option<Arc<W::Responder>> {
        self.responder.read().as_ref().and_then(Weak::upgrade)
    }

    fn stop(&self) {
        let _lifecycle = self.lifecycle.lock();
        let was_observing = self.observing.swap(false, Ordering::SeqCst);
        // Take the bag out before disposing so no lock is held while
        // listeners are unregistered.
        let mut bag = std::mem::take(&mut *self.bag.lock());
        let released = bag.len();
        bag.dispose();
        if self.wiring.is_observing_notifications() {
            self.wiring.stop_notifications();
        }
        if was_observing || released > 0 {
            tracing::debug!(observer = self.label, released, "Stopped observing");
        }
    }
}

impl<W: Wiring> Gate<W::Responder> for Shared<W> {
    fn open(&self, facet: &'static str) -> Option<Arc<W::Responder>> {
        if !self.observing.load(Ordering::SeqCst) {
            return None;
        }
        match self.current_responder() {
            Some(responder) => {
                tracing::trace!(observer = self.label, facet, "Delivering");
                Some(responder)
            }
            None => {
                tracing::warn!(
                    observer = self.label,
                    facet,
                    "Responder released without detach, stopping observer"
                );
                self.stop();
                None
            }
        }
    }
}

impl<W: Wiring> Drop for Shared<W> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Lifecycle-managed bridge from a screen's state stream to its responder.
///
/// Cheap to clone; clones share the same lifecycle. The per-screen facet
/// set comes from the [`Wiring`].
pub struct ScreenObserver<W: Wiring> {
    shared: Arc<Shared<W>>,
}

impl<W: Wiring> Clone for ScreenObserver<W> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<W: Wiring> fmt::Debug for ScreenObserver<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenObserver")
            .field("label", &self.shared.label)
            .field("observing", &self.is_observing())
            .field("subscriptions", &self.shared.bag.lock().len())
            .finish()
    }
}

impl<W: Wiring> ScreenObserver<W> {
    pub fn from_wiring(label: &'static str, wiring: W) -> Self {
        Self {
            shared: Arc::new(Shared {
                label,
                wiring,
                responder: RwLock::new(None),
                generation: AtomicU64::new(0),
                observing: AtomicBool::new(false),
                bag: Mutex::new(DisposeBag::new()),
                lifecycle: ReentrantMutex::new(()),
            }),
        }
    }

    pub fn wiring(&self) -> &W {
        &self.shared.wiring
    }

    pub fn label(&self) -> &'static str {
        self.shared.label
    }

    pub fn event_responder(&self) -> Option<Arc<W::Responder>> {
        self.shared.current_responder()
    }

    /// Number of live facet subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.shared.bag.lock().len()
    }

    /// Replace the responder.
    ///
    /// Assigning `None` stops observing before the old reference is dropped.
    /// Assigning a different responder keeps the current subscriptions; they
    /// deliver to the new responder from the next change on.
    pub fn set_event_responder(&self, responder: Option<&Arc<W::Responder>>) {
        if responder.is_none() {
            self.stop_observing();
        }
        let next = responder.map(Arc::downgrade);
        let previous = std::mem::replace(&mut *self.shared.responder.write(), next);
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            observer = self.shared.label,
            attached = responder.is_some(),
            "Event responder assigned"
        );
        drop(previous);
    }

    /// Attach `responder` and return a token that detaches it when dropped.
    ///
    /// The token only detaches if `responder` is still the attached one, so
    /// an outdated token cannot tear down a newer attachment.
    pub fn attach(&self, responder: &Arc<W::Responder>) -> Attachment {
        self.set_event_responder(Some(responder));
        let generation = self.shared.generation.load(Ordering::SeqCst);
        let observer = Arc::downgrade(&self.shared);
        Attachment {
            label: self.shared.label,
            detach: Some(Box::new(move || {
                let Some(shared) = observer.upgrade() else {
                    return;
                };
                if shared.generation.load(Ordering::SeqCst) == generation {
                    ScreenObserver { shared }.set_event_responder(None);
                }
            })),
        }
    }

    /// Detach the current responder, stopping observation first.
    pub fn detach(&self) {
        self.set_event_responder(None);
    }

    fn delivery(&self) -> Delivery<W::Responder> {
        let gate: Arc<dyn Gate<W::Responder>> = self.shared.clone();
        Delivery {
            gate: Arc::downgrade(&gate),
        }
    }
}

impl<W: Wiring> Observer for ScreenObserver<W> {
    fn start_observing(&self) {
        let shared = &self.shared;
        let has_responder = shared.current_responder().is_some();
        debug_assert!(
            has_responder,
            "{}: start_observing called without an event responder",
            shared.label
        );
        if !has_responder {
            tracing::error!(
                observer = shared.label,
                "start_observing called without an event responder"
            );
            return;
        }

        // Held for the whole transition: a concurrent start waits here and
        // then finds the observer already observing.
        let _lifecycle = shared.lifecycle.lock();
        if self.is_observing() {
            return;
        }

        // Clear anything left over from a responder that vanished mid-cycle.
        shared.stop();

        // The flag goes up first: subscribing replays the current values,
        // and those deliveries must pass the gate.
        shared.observing.store(true, Ordering::SeqCst);
        let delivery = self.delivery();
        let mut fresh = DisposeBag::new();
        shared.wiring.subscribe(&delivery, &mut fresh);

        // A replayed callback may have stopped the observer (detach, or
        // stop_observing) before any of these reached the bag.
        if !shared.observing.load(Ordering::SeqCst) {
            let released = fresh.len();
            fresh.dispose();
            tracing::debug!(
                observer = shared.label,
                released,
                "Stopped while starting, subscriptions released"
            );
            return;
        }

        shared.wiring.start_notifications(&delivery);

        let count = fresh.len();
        shared.bag.lock().append(&mut fresh);
        tracing::debug!(observer = shared.label, facets = count, "Started observing");
    }

    fn stop_observing(&self) {
        self.shared.stop();
    }

    fn is_observing(&self) -> bool {
        let shared = &self.shared;
        shared.observing.load(Ordering::SeqCst)
            && shared.wiring.is_observing_notifications()
            && shared.current_responder().is_some()
    }
}

/// Ownership token for an attached responder.
///
/// Keep it next to the responder; dropping it (or calling
/// [`Attachment::detach`]) detaches the responder and stops observation.
#[must_use = "dropping an Attachment detaches the responder immediately"]
pub struct Attachment {
    label: &'static str,
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Attachment {
    pub fn detach(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("observer", &self.label)
            .field("attached", &self.detach.is_some())
            .finish()
    }
}
