mod observer;
mod state;

pub use observer::{MainEventResponder, MainObserver, MainWiring};
pub use state::MainViewState;
