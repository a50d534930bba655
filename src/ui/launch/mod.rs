mod observer;

pub use observer::{LaunchEventResponder, LaunchObserver, LaunchWiring};
