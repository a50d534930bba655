use std::sync::Arc;

use crate::store::{first_pending, DisposeBag, DistinctExt, StateStream};
use crate::ui::app_state::{ErrorMessage, Rect, SignInViewControllerState, SignInViewState};
use crate::ui::observer::{
    Delivery, KeyboardBridge, KeyboardEvent, NotificationSource, ScreenObserver, Wiring,
};

/// Sign-in screen responder.
pub trait SignInEventResponder: Send + Sync {
    fn received_new_view_state(&self, view_state: SignInViewState);
    fn received_new_error_message(&self, message: ErrorMessage);
    fn keyboard_will_hide(&self);
    fn keyboard_will_change_frame(&self, keyboard_end_frame: Rect);
}

/// Two facets (view state, error messages) plus keyboard notifications.
pub struct SignInWiring {
    sign_in_state: Arc<dyn StateStream<SignInViewControllerState>>,
    keyboard: KeyboardBridge,
}

impl SignInWiring {
    pub fn keyboard(&self) -> &KeyboardBridge {
        &self.keyboard
    }
}

impl Wiring for SignInWiring {
    type Responder = dyn SignInEventResponder;

    fn subscribe(&self, delivery: &Delivery<Self::Responder>, bag: &mut DisposeBag) {
        let errors = delivery.clone();
        self.sign_in_state
            .subscribe_distinct_present(
                |state: &SignInViewControllerState| first_pending(&state.errors_to_present),
                move |message| {
                    errors.send("error_message", |responder| {
                        responder.received_new_error_message(message)
                    })
                },
            )
            .disposed_by(bag);

        let views = delivery.clone();
        self.sign_in_state
            .subscribe_distinct(
                |state: &SignInViewControllerState| state.view_state,
                move |view_state| {
                    views.send("view_state", |responder| {
                        responder.received_new_view_state(view_state)
                    })
                },
            )
            .disposed_by(bag);
    }

    fn start_notifications(&self, delivery: &Delivery<Self::Responder>) {
        let delivery = delivery.clone();
        self.keyboard.start(move |event| match event {
            KeyboardEvent::WillHide => {
                delivery.send("keyboard_will_hide", |responder| responder.keyboard_will_hide())
            }
            KeyboardEvent::WillChangeFrame(frame) => {
                delivery.send("keyboard_will_change_frame", |responder| {
                    responder.keyboard_will_change_frame(frame)
                })
            }
        });
    }

    fn stop_notifications(&self) {
        self.keyboard.stop();
    }

    fn is_observing_notifications(&self) -> bool {
        self.keyboard.is_observing()
    }
}

pub type SignInObserver = ScreenObserver<SignInWiring>;

impl ScreenObserver<SignInWiring> {
    pub fn new(
        sign_in_state: Arc<dyn StateStream<SignInViewControllerState>>,
        notifications: Arc<dyn NotificationSource>,
    ) -> Self {
        Self::from_wiring(
            "sign_in",
            SignInWiring {
                sign_in_state,
                keyboard: KeyboardBridge::new(notifications),
            },
        )
    }
}
