use std::sync::Arc;

use crate::store::{DisposeBag, DistinctExt, StateStream};
use crate::ui::app_state::AppState;
use crate::ui::main_screen::state::MainViewState;
use crate::ui::observer::{Delivery, ScreenObserver, Wiring};

/// Root screen responder.
pub trait MainEventResponder: Send + Sync {
    fn transition_to_new(&self, state: MainViewState);
}

/// One facet: the top-level UI mode.
pub struct MainWiring {
    app_state: Arc<dyn StateStream<AppState>>,
}

impl Wiring for MainWiring {
    type Responder = dyn MainEventResponder;

    fn subscribe(&self, delivery: &Delivery<Self::Responder>, bag: &mut DisposeBag) {
        let delivery = delivery.clone();
        self.app_state
            .subscribe_distinct(MainViewState::from_app_state, move |state| {
                delivery.send("main_view_state", |responder| responder.transition_to_new(state))
            })
            .disposed_by(bag);
    }
}

pub type MainObserver = ScreenObserver<MainWiring>;

impl ScreenObserver<MainWiring> {
    pub fn new(app_state: Arc<dyn StateStream<AppState>>) -> Self {
        Self::from_wiring("main", MainWiring { app_state })
    }
}
