//! External notification bridging.
//!
//! Platform notifications (keyboard geometry and visibility) arrive through
//! an injected [`NotificationSource`] rather than a process-wide registry.
//! A [`KeyboardBridge`] registers with the source only while its observer is
//! observing and translates raw notifications into [`KeyboardEvent`]s.
//! Notifications with missing or mistyped payload fields are dropped.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::ui::app_state::Rect;

/// Identity used to register with and deregister from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(Uuid);

impl ObserverId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObserverId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationName {
    KeyboardWillHide,
    KeyboardWillChangeFrame,
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserInfoKey {
    /// Keyboard frame at the end of the animation.
    KeyboardFrameEnd,
    Custom(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserInfoValue {
    Rect(Rect),
    Number(f64),
    Text(String),
}

/// A raw platform notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub name: NotificationName,
    pub user_info: Option<HashMap<UserInfoKey, UserInfoValue>>,
}

impl Notification {
    pub fn new(name: NotificationName) -> Self {
        Self {
            name,
            user_info: None,
        }
    }

    pub fn with_info(mut self, key: UserInfoKey, value: UserInfoValue) -> Self {
        self.user_info
            .get_or_insert_with(HashMap::new)
            .insert(key, value);
        self
    }
}

pub type NotificationHandler = Arc<dyn Fn(&Notification) + Send + Sync>;

/// Registration-based source of platform notifications.
///
/// Registrations are keyed by observer identity, not by a cancellation
/// handle: `remove_observer` drops every handler the observer registered.
pub trait NotificationSource: Send + Sync {
    fn add_observer(&self, observer: ObserverId, name: NotificationName, handler: NotificationHandler);
    fn remove_observer(&self, observer: ObserverId);
}

struct Registration {
    observer: ObserverId,
    name: NotificationName,
    handler: NotificationHandler,
}

/// In-process [`NotificationSource`] that dispatches posted notifications
/// synchronously to every matching registration.
#[derive(Default)]
pub struct NotificationCenter {
    registrations: RwLock<Vec<Registration>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, notification: &Notification) {
        let handlers: Vec<NotificationHandler> = self
            .registrations
            .read()
            .iter()
            .filter(|registration| registration.name == notification.name)
            .map(|registration| Arc::clone(&registration.handler))
            .collect();
        for handler in handlers {
            handler(notification);
        }
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.read().len()
    }
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("registrations", &self.registration_count())
            .finish()
    }
}

impl NotificationSource for NotificationCenter {
    fn add_observer(&self, observer: ObserverId, name: NotificationName, handler: NotificationHandler) {
        self.registrations.write().push(Registration {
            observer,
            name,
            handler,
        });
    }

    fn remove_observer(&self, observer: ObserverId) {
        self.registrations
            .write()
            .retain(|registration| registration.observer != observer);
    }
}

/// Abstract keyboard events forwarded to responders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardEvent {
    WillHide,
    WillChangeFrame(Rect),
}

/// Keyboard notification bridge for one observer.
///
/// Whether it is registered is tracked by a flag, since the source API has
/// no cancellation object to hold on to.
pub struct KeyboardBridge {
    source: Arc<dyn NotificationSource>,
    id: ObserverId,
    observing: AtomicBool,
}

impl fmt::Debug for KeyboardBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardBridge")
            .field("id", &self.id)
            .field("observing", &self.is_observing())
            .finish()
    }
}

impl KeyboardBridge {
    pub fn new(source: Arc<dyn NotificationSource>) -> Self {
        Self {
            source,
            id: ObserverId::new(),
            observing: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    pub fn is_observing(&self) -> bool {
        self.observing.load(Ordering::SeqCst)
    }

    /// Register for keyboard notifications. No-op when already registered.
    pub fn start(&self, forward: impl Fn(KeyboardEvent) + Send + Sync + 'static) {
        if self.observing.swap(true, Ordering::SeqCst) {
            return;
        }
        let forward = Arc::new(forward);
        for name in [
            NotificationName::KeyboardWillHide,
            NotificationName::KeyboardWillChangeFrame,
        ] {
            let forward = Arc::clone(&forward);
            self.source.add_observer(
                self.id,
                name,
                Arc::new(move |notification: &Notification| {
                    if let Some(event) = Self::translate(notification) {
                        forward(event);
                    }
                }),
            );
        }
        tracing::debug!(observer = %self.id, "Keyboard notifications registered");
    }

    /// Deregister. No-op when not registered.
    pub fn stop(&self) {
        if !self.observing.swap(false, Ordering::SeqCst) {
            return;
        }
        self.source.remove_observer(self.id);
        tracing::debug!(observer = %self.id, "Keyboard notifications removed");
    }

    /// Translate a raw notification, dropping malformed payloads.
    pub fn translate(notification: &Notification) -> Option<KeyboardEvent> {
        match notification.name {
            NotificationName::KeyboardWillHide => Some(KeyboardEvent::WillHide),
            NotificationName::KeyboardWillChangeFrame => {
                let frame = notification
                    .user_info
                    .as_ref()
                    .and_then(|info| info.get(&UserInfoKey::KeyboardFrameEnd));
                match frame {
                    Some(UserInfoValue::Rect(rect)) => Some(KeyboardEvent::WillChangeFrame(*rect)),
                    _ => {
                        tracing::trace!(
                            "Keyboard frame notification without an end frame, dropped"
                        );
                        None
                    }
                }
            }
            NotificationName::Custom(_) => None,
        }
    }
}

impl Drop for KeyboardBridge {
    fn drop(&mut self) {
        self.stop();
    }
}
