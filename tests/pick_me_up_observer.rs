mod common;

use common::{pick_me_up_with, requesting_ride, Event, Recorder};
use statescope::store::{StateStore, StateStream};
use statescope::ui::app_state::{
    AppState, ErrorMessage, NewRideRequest, NewRideRequestSendingState, PickMeUpState,
    PickMeUpViewControllerState, RideOptionPickerViewControllerState,
};
use statescope::ui::getters::AppGetters;
use statescope::ui::observer::{Attachment, Observer};
use statescope::ui::pick_me_up::{PickMeUpEventResponder, PickMeUpObserver, PickMeUpView};
use std::sync::Arc;

struct Harness {
    store: StateStore<AppState>,
    observer: PickMeUpObserver,
    recorder: Arc<Recorder>,
    _attachment: Attachment,
}

fn observe(initial: PickMeUpViewControllerState) -> Harness {
    let store = StateStore::new(requesting_ride(initial));
    let stream: Arc<dyn StateStream<PickMeUpViewControllerState>> =
        Arc::new(store.scoped(AppGetters.pick_me_up_state()));
    let observer = PickMeUpObserver::new(stream);
    let recorder = Arc::new(Recorder::new());
    let responder: Arc<dyn PickMeUpEventResponder> = recorder.clone();
    let attachment = observer.attach(&responder);
    observer.start_observing();
    Harness {
        store,
        observer,
        recorder,
        _attachment: attachment,
    }
}

fn request() -> NewRideRequest {
    NewRideRequest {
        pickup_name: "Home".to_string(),
        dropoff_name: "Office".to_string(),
        ride_option_id: "pool".to_string(),
    }
}

fn with_errors(errors: &[&ErrorMessage]) -> PickMeUpViewControllerState {
    PickMeUpViewControllerState {
        errors_to_present: errors.iter().map(|e| (*e).clone()).collect(),
        ..pick_me_up_with(PickMeUpState::Initial)
    }
}

#[test]
fn initial_then_duplicate_then_dropoff() {
    let h = observe(pick_me_up_with(PickMeUpState::Initial));
    assert_eq!(h.recorder.views(), vec![PickMeUpView::Initial]);

    h.store
        .publish(requesting_ride(pick_me_up_with(PickMeUpState::Initial)));
    assert_eq!(h.recorder.views(), vec![PickMeUpView::Initial]);

    h.store.publish(requesting_ride(pick_me_up_with(
        PickMeUpState::SelectDropoffLocation(Default::default()),
    )));
    assert_eq!(
        h.recorder.views(),
        vec![PickMeUpView::Initial, PickMeUpView::SelectDropoffLocation]
    );
}

#[test]
fn sending_request_overrides_screen_state() {
    let h = observe(pick_me_up_with(PickMeUpState::Initial));

    let sending = PickMeUpViewControllerState {
        sending_state: NewRideRequestSendingState::Sending(request()),
        ..pick_me_up_with(PickMeUpState::SelectRideOption(
            RideOptionPickerViewControllerState::default(),
            true,
        ))
    };
    h.store.publish(requesting_ride(sending.clone()));

    // A different arm underneath does not change the view while sending.
    let mut still_sending = sending;
    still_sending.state = PickMeUpState::Final;
    h.store.publish(requesting_ride(still_sending));

    assert_eq!(
        h.recorder.views(),
        vec![
            PickMeUpView::Initial,
            PickMeUpView::SendingRideRequest(request())
        ]
    );
}

#[test]
fn confirming_flag_changes_the_view() {
    let h = observe(pick_me_up_with(PickMeUpState::SelectRideOption(
        RideOptionPickerViewControllerState::default(),
        false,
    )));
    h.store.publish(requesting_ride(pick_me_up_with(
        PickMeUpState::SelectRideOption(RideOptionPickerViewControllerState::default(), true),
    )));

    assert_eq!(
        h.recorder.views(),
        vec![PickMeUpView::SelectRideOption, PickMeUpView::ConfirmRequest]
    );
}

#[test]
fn repeated_error_is_delivered_once() {
    let a = ErrorMessage::new("Network", "Could not reach the server");
    let b = ErrorMessage::new("Network", "Could not reach the server");
    let h = observe(with_errors(&[&a]));

    h.store.publish(requesting_ride(with_errors(&[&a])));
    h.store.publish(requesting_ride(with_errors(&[&b])));

    assert_eq!(h.recorder.errors(), vec![a, b]);
}

#[test]
fn only_the_oldest_error_is_surfaced() {
    let a = ErrorMessage::new("First", "a");
    let b = ErrorMessage::new("Second", "b");
    let h = observe(with_errors(&[&a, &b]));

    h.store.publish(requesting_ride(with_errors(&[])));
    h.store.publish(requesting_ride(with_errors(&[&b])));

    assert_eq!(h.recorder.errors(), vec![a, b]);
}

#[test]
fn facets_deduplicate_independently() {
    let h = observe(pick_me_up_with(PickMeUpState::Initial));

    let hidden = PickMeUpViewControllerState {
        should_display_where_to: false,
        ..pick_me_up_with(PickMeUpState::Initial)
    };
    h.store.publish(requesting_ride(hidden));

    assert_eq!(
        h.recorder.events(),
        vec![
            Event::WhereTo(true),
            Event::View(PickMeUpView::Initial),
            Event::WhereTo(false),
        ]
    );
}

#[test]
fn leaving_the_flow_delivers_nothing() {
    let h = observe(pick_me_up_with(PickMeUpState::Initial));
    h.recorder.clear();

    h.store.publish(AppState::default());
    assert!(h.recorder.events().is_empty());

    h.store
        .publish(requesting_ride(pick_me_up_with(PickMeUpState::Initial)));
    assert!(h.recorder.events().is_empty());
    assert!(h.observer.is_observing());
}

#[test]
fn publish_from_inside_a_callback_is_delivered_in_order() {
    struct Republisher {
        store: StateStore<AppState>,
        recorder: Recorder,
    }

    impl PickMeUpEventResponder for Republisher {
        fn received_should_display_where_to(&self, should_display: bool) {
            self.recorder.received_should_display_where_to(should_display);
        }

        fn received_new_view(&self, view: PickMeUpView) {
            if view == PickMeUpView::SelectDropoffLocation {
                self.store
                    .publish(requesting_ride(pick_me_up_with(PickMeUpState::Final)));
            }
            self.recorder.received_new_view(view);
        }

        fn received_new_error_message(&self, message: ErrorMessage) {
            PickMeUpEventResponder::received_new_error_message(&self.recorder, message);
        }
    }

    let store = StateStore::new(requesting_ride(pick_me_up_with(PickMeUpState::Initial)));
    let stream: Arc<dyn StateStream<PickMeUpViewControllerState>> =
        Arc::new(store.scoped(AppGetters.pick_me_up_state()));
    let observer = PickMeUpObserver::new(stream);
    let republisher = Arc::new(Republisher {
        store: store.clone(),
        recorder: Recorder::new(),
    });
    let responder: Arc<dyn PickMeUpEventResponder> = republisher.clone();
    let _attachment = observer.attach(&responder);
    observer.start_observing();

    store.publish(requesting_ride(pick_me_up_with(
        PickMeUpState::SelectDropoffLocation(Default::default()),
    )));

    assert_eq!(
        republisher.recorder.views(),
        vec![
            PickMeUpView::Initial,
            PickMeUpView::SelectDropoffLocation,
            PickMeUpView::Final
        ]
    );
}
