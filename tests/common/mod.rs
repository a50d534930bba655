//! Shared test utilities: recording responders and state builders.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use statescope::ui::app_state::{
    AppState, ErrorMessage, LaunchViewControllerState, Location, OnboardingState,
    PickMeUpState, PickMeUpViewControllerState, Rect, RunningState, SignInViewControllerState,
    SignInViewState, SignedInViewControllerState, UserProfile, UserSession,
};
use statescope::ui::launch::LaunchEventResponder;
use statescope::ui::main_screen::{MainEventResponder, MainViewState};
use statescope::ui::pick_me_up::{PickMeUpEventResponder, PickMeUpView};
use statescope::ui::sign_in::SignInEventResponder;

/// One responder call, recorded in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    MainState(MainViewState),
    Error(ErrorMessage),
    SignInView(SignInViewState),
    KeyboardHide,
    KeyboardFrame(Rect),
    WhereTo(bool),
    View(PickMeUpView),
}

/// Responder for every screen that appends each call to a shared log.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn views(&self) -> Vec<PickMeUpView> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::View(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<ErrorMessage> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().push(event);
    }
}

impl MainEventResponder for Recorder {
    fn transition_to_new(&self, state: MainViewState) {
        self.push(Event::MainState(state));
    }
}

impl LaunchEventResponder for Recorder {
    fn received_new_error_message(&self, message: ErrorMessage) {
        self.push(Event::Error(message));
    }
}

impl SignInEventResponder for Recorder {
    fn received_new_view_state(&self, view_state: SignInViewState) {
        self.push(Event::SignInView(view_state));
    }

    fn received_new_error_message(&self, message: ErrorMessage) {
        self.push(Event::Error(message));
    }

    fn keyboard_will_hide(&self) {
        self.push(Event::KeyboardHide);
    }

    fn keyboard_will_change_frame(&self, keyboard_end_frame: Rect) {
        self.push(Event::KeyboardFrame(keyboard_end_frame));
    }
}

impl PickMeUpEventResponder for Recorder {
    fn received_should_display_where_to(&self, should_display: bool) {
        self.push(Event::WhereTo(should_display));
    }

    fn received_new_view(&self, view: PickMeUpView) {
        self.push(Event::View(view));
    }

    fn received_new_error_message(&self, message: ErrorMessage) {
        self.push(Event::Error(message));
    }
}

pub fn pickup() -> Location {
    Location {
        latitude: 37.7749,
        longitude: -122.4194,
    }
}

pub fn session() -> UserSession {
    UserSession {
        profile: UserProfile {
            name: "Rider".to_string(),
            email: "rider@example.com".to_string(),
        },
        auth_token: "token".to_string(),
    }
}

pub fn launching(errors: Vec<ErrorMessage>) -> AppState {
    AppState::Launching(LaunchViewControllerState {
        errors_to_present: errors,
    })
}

pub fn signing_in(sign_in: SignInViewControllerState) -> AppState {
    AppState::Running(RunningState::Onboarding(OnboardingState::SigningIn(sign_in)))
}

pub fn requesting_ride(pick_me_up: PickMeUpViewControllerState) -> AppState {
    AppState::Running(RunningState::SignedIn(
        SignedInViewControllerState::RequestingNewRide(pickup(), pick_me_up),
        session(),
    ))
}

pub fn pick_me_up_with(state: PickMeUpState) -> PickMeUpViewControllerState {
    PickMeUpViewControllerState {
        state,
        ..PickMeUpViewControllerState::new(pickup())
    }
}
