//! Selector registries.
//!
//! A registry bundles the selectors needed to wire one screen, so observers
//! are built from data rather than from per-call-site projections. Child
//! selectors are derived from the registry's root selector by composition.

use crate::arm;
use crate::ui::app_state::{
    AppState, DropoffLocationPickerViewControllerState, LaunchViewControllerState,
    MapViewControllerState, OnboardingState, PickMeUpState, PickMeUpViewControllerState,
    RideOptionPickerViewControllerState, RunningState, SignInViewControllerState,
    SignedInViewControllerState,
};
use crate::ui::main_screen::MainViewState;
use crate::ui::mvi::Selector;

/// Top-level selectors over [`AppState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AppGetters;

impl AppGetters {
    pub fn root(&self) -> Selector<AppState, AppState> {
        Selector::identity()
    }

    /// Always in scope.
    pub fn main_view_state(&self) -> Selector<AppState, MainViewState> {
        MainViewState::selector()
    }

    pub fn launch_state(&self) -> Selector<AppState, LaunchViewControllerState> {
        self.root()
            .then(arm!(AppState::Launching(launch) => launch.clone()))
    }

    pub fn running_state(&self) -> Selector<AppState, RunningState> {
        self.root()
            .then(arm!(AppState::Running(running) => running.clone()))
    }

    pub fn onboarding_state(&self) -> Selector<AppState, OnboardingState> {
        self.running_state()
            .then(arm!(RunningState::Onboarding(onboarding) => onboarding.clone()))
    }

    pub fn sign_in_state(&self) -> Selector<AppState, SignInViewControllerState> {
        self.onboarding_state()
            .then(arm!(OnboardingState::SigningIn(sign_in) => sign_in.clone()))
    }

    pub fn signed_in_state(&self) -> Selector<AppState, SignedInViewControllerState> {
        self.running_state()
            .then(arm!(RunningState::SignedIn(signed_in, _) => signed_in.clone()))
    }

    pub fn pick_me_up_state(&self) -> Selector<AppState, PickMeUpViewControllerState> {
        self.signed_in_state().then(arm!(
            SignedInViewControllerState::RequestingNewRide(_, pick_me_up) => pick_me_up.clone()
        ))
    }

    pub fn pick_me_up_getters(&self) -> PickMeUpGetters {
        PickMeUpGetters::new(self.pick_me_up_state())
    }
}

/// Selectors for the screens embedded in the pick-me-up flow.
#[derive(Debug, Clone)]
pub struct PickMeUpGetters {
    get_pick_me_up_state: Selector<AppState, PickMeUpViewControllerState>,
}

impl PickMeUpGetters {
    pub fn new(get_pick_me_up_state: Selector<AppState, PickMeUpViewControllerState>) -> Self {
        Self {
            get_pick_me_up_state,
        }
    }

    pub fn pick_me_up_state(&self) -> Selector<AppState, PickMeUpViewControllerState> {
        self.get_pick_me_up_state.clone()
    }

    pub fn dropoff_location_picker_state(
        &self,
    ) -> Selector<AppState, DropoffLocationPickerViewControllerState> {
        self.get_pick_me_up_state.then(arm!(
            PickMeUpViewControllerState {
                state: PickMeUpState::SelectDropoffLocation(picker),
                ..
            } => picker.clone()
        ))
    }

    /// The map is embedded in every arm of the flow, so this is in scope
    /// whenever the flow itself is.
    pub fn map_state(&self) -> Selector<AppState, MapViewControllerState> {
        self.get_pick_me_up_state
            .map(|pick_me_up| pick_me_up.map_view_controller_state.clone())
    }

    pub fn ride_option_picker_state(
        &self,
    ) -> Selector<AppState, RideOptionPickerViewControllerState> {
        self.get_pick_me_up_state.then(arm!(
            PickMeUpViewControllerState {
                state: PickMeUpState::SelectRideOption(picker, _),
                ..
            } => picker.clone()
        ))
    }
}
