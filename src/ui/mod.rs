//! Screen-level observation.
//!
//! [`app_state`] defines the state tree, [`getters`] the selectors into it,
//! and each screen module pairs a responder trait with the observer that
//! feeds it.

pub mod app_state;
pub mod getters;
pub mod launch;
pub mod main_screen;
pub mod mvi;
pub mod observer;
pub mod pick_me_up;
pub mod sign_in;
