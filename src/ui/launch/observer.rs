use std::sync::Arc;

use crate::store::{first_pending, DisposeBag, DistinctExt, StateStream};
use crate::ui::app_state::{ErrorMessage, LaunchViewControllerState};
use crate::ui::observer::{Delivery, ScreenObserver, Wiring};

/// Launch screen responder.
pub trait LaunchEventResponder: Send + Sync {
    fn received_new_error_message(&self, message: ErrorMessage);
}

/// One facet: the oldest pending launch error.
pub struct LaunchWiring {
    launch_state: Arc<dyn StateStream<LaunchViewControllerState>>,
}

impl Wiring for LaunchWiring {
    type Responder = dyn LaunchEventResponder;

    fn subscribe(&self, delivery: &Delivery<Self::Responder>, bag: &mut DisposeBag) {
        let delivery = delivery.clone();
        self.launch_state
            .subscribe_distinct_present(
                |state: &LaunchViewControllerState| first_pending(&state.errors_to_present),
                move |message| {
                    delivery.send("error_message", |responder| {
                        responder.received_new_error_message(message)
                    })
                },
            )
            .disposed_by(bag);
    }
}

pub type LaunchObserver = ScreenObserver<LaunchWiring>;

impl ScreenObserver<LaunchWiring> {
    pub fn new(launch_state: Arc<dyn StateStream<LaunchViewControllerState>>) -> Self {
        Self::from_wiring("launch", LaunchWiring { launch_state })
    }
}
