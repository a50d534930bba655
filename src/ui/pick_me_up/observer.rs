use std::sync::Arc;

use crate::store::{first_pending, DisposeBag, DistinctExt, StateStream};
use crate::ui::app_state::{ErrorMessage, PickMeUpViewControllerState};
use crate::ui::observer::{Delivery, ScreenObserver, Wiring};
use crate::ui::pick_me_up::view::PickMeUpView;

/// Pick-me-up screen responder.
pub trait PickMeUpEventResponder: Send + Sync {
    fn received_should_display_where_to(&self, should_display: bool);
    fn received_new_view(&self, view: PickMeUpView);
    fn received_new_error_message(&self, message: ErrorMessage);
}

/// Three facets, each deduplicated on its own.
pub struct PickMeUpWiring {
    pick_me_up_state: Arc<dyn StateStream<PickMeUpViewControllerState>>,
}

impl Wiring for PickMeUpWiring {
    type Responder = dyn PickMeUpEventResponder;

    fn subscribe(&self, delivery: &Delivery<Self::Responder>, bag: &mut DisposeBag) {
        let where_to = delivery.clone();
        self.pick_me_up_state
            .subscribe_distinct(
                |state: &PickMeUpViewControllerState| state.should_display_where_to,
                move |should_display| {
                    where_to.send("should_display_where_to", |responder| {
                        responder.received_should_display_where_to(should_display)
                    })
                },
            )
            .disposed_by(bag);

        let views = delivery.clone();
        self.pick_me_up_state
            .subscribe_distinct(PickMeUpView::from_state, move |view| {
                views.send("view", |responder| responder.received_new_view(view))
            })
            .disposed_by(bag);

        let errors = delivery.clone();
        self.pick_me_up_state
            .subscribe_distinct_present(
                |state: &PickMeUpViewControllerState| first_pending(&state.errors_to_present),
                move |message| {
                    errors.send("error_message", |responder| {
                        responder.received_new_error_message(message)
                    })
                },
            )
            .disposed_by(bag);
    }
}

pub type PickMeUpObserver = ScreenObserver<PickMeUpWiring>;

impl ScreenObserver<PickMeUpWiring> {
    pub fn new(pick_me_up_state: Arc<dyn StateStream<PickMeUpViewControllerState>>) -> Self {
        Self::from_wiring("pick_me_up", PickMeUpWiring { pick_me_up_state })
    }
}
