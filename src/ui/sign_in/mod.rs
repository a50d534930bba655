mod observer;

pub use observer::{SignInEventResponder, SignInObserver, SignInWiring};
