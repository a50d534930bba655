mod observer;
mod view;

pub use observer::{PickMeUpEventResponder, PickMeUpObserver, PickMeUpWiring};
pub use view::{project, PickMeUpView};
