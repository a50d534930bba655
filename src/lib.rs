//! Reactive state observation for unidirectional UI architectures.
//!
//! A single application state value is published into a [`StateStore`].
//! [`Selector`]s project it to the sub-state one screen cares about, and a
//! per-screen [`ScreenObserver`] turns each deduplicated change of that
//! sub-state into a call on a weakly held responder.

pub mod config;
pub mod logging;
pub mod store;
pub mod ui;

pub use config::{Config, ConfigError};
pub use store::{
    first_pending, DisposeBag, DistinctExt, Listener, Scoped, StateStore, StateStream,
    Subscription,
};
pub use ui::mvi::{ScopedState, Selector, UiState};
pub use ui::observer::{Attachment, Delivery, Observer, ScreenObserver, Wiring};
