//! Unidirectional data flow primitives.
//!
//! This module provides the pieces that turn one global application state
//! into the scoped sub-states individual screens care about.
//!
//! # Architecture
//!
//! ```text
//! AppState ──→ Selector ──→ ScopedState<T> ──→ Observer ──→ Responder
//!    ↑                                                          │
//!    └──────────────────── (external producer) ─────────────────┘
//! ```
//!
//! - **State**: Immutable representation of UI state
//! - **ScopedState**: Whether a screen's sub-state is currently meaningful
//! - **Selector**: Pure, total projection from the root state to a sub-state

mod scope;
mod selector;
mod state;

pub use scope::ScopedState;
pub use selector::Selector;
pub use state::UiState;
