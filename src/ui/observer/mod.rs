//! Observers bridge scoped state streams to UI-facing responders.
//!
//! Each screen has one observer. The observer holds a fixed set of
//! deduplicating facet subscriptions (and optionally a notification bridge),
//! starts and stops them together, and forwards every change to a weakly
//! held responder.

mod lifecycle;
mod notifications;

pub use lifecycle::{Attachment, Delivery, ScreenObserver};
pub use notifications::{
    KeyboardBridge, KeyboardEvent, Notification, NotificationCenter, NotificationHandler,
    NotificationName, NotificationSource, ObserverId, UserInfoKey, UserInfoValue,
};

use crate::store::DisposeBag;

/// Idempotent observation lifecycle shared by every screen observer.
pub trait Observer: Send + Sync {
    /// Subscribe every facet. No-op when already observing.
    ///
    /// Calling this without an attached responder is a wiring bug: it trips
    /// a debug assertion and is otherwise ignored.
    fn start_observing(&self);

    /// Cancel every facet subscription. No-op when idle.
    fn stop_observing(&self);

    fn is_observing(&self) -> bool;
}

/// The fixed facet set of one screen.
pub trait Wiring: Send + Sync + 'static {
    /// Capability interface receiving this screen's changes.
    type Responder: ?Sized + Send + Sync + 'static;

    /// Subscribe every facet, delivering through `delivery`, and hand the
    /// subscriptions to `bag`.
    fn subscribe(&self, delivery: &Delivery<Self::Responder>, bag: &mut DisposeBag);

    /// Register for external notifications while observing.
    fn start_notifications(&self, _delivery: &Delivery<Self::Responder>) {}

    fn stop_notifications(&self) {}

    /// Whether the notification part of the wiring is live. Wirings without
    /// notifications are always considered live.
    fn is_observing_notifications(&self) -> bool {
        true
    }
}
