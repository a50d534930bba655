//! Top-level UI mode derived from the application state.

use crate::ui::app_state::{AppState, RunningState, UserSession};
use crate::ui::mvi::{Selector, UiState};

/// Which top-level child the root screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainViewState {
    Launching,
    Onboarding,
    SignedIn(UserSession),
}

impl UiState for MainViewState {}

impl MainViewState {
    /// Total derivation: every application state maps to exactly one mode.
    pub fn from_app_state(state: &AppState) -> Self {
        match state {
            AppState::Launching(_) => MainViewState::Launching,
            AppState::Running(RunningState::Onboarding(_)) => MainViewState::Onboarding,
            AppState::Running(RunningState::SignedIn(_, session)) => {
                MainViewState::SignedIn(session.clone())
            }
        }
    }

    pub fn selector() -> Selector<AppState, MainViewState> {
        Selector::<AppState, AppState>::identity().map(Self::from_app_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::app_state::{OnboardingState, SignedInViewControllerState, UserProfile};
    use crate::ui::mvi::ScopedState;

    #[test]
    fn every_app_state_maps_to_a_mode() {
        assert_eq!(
            MainViewState::from_app_state(&AppState::default()),
            MainViewState::Launching
        );
        assert_eq!(
            MainViewState::from_app_state(&AppState::Running(RunningState::Onboarding(
                OnboardingState::Welcoming
            ))),
            MainViewState::Onboarding
        );

        let session = UserSession {
            profile: UserProfile {
                name: "Ada".into(),
                email: "ada@example.com".into(),
            },
            auth_token: "t".into(),
        };
        let signed_in = AppState::Running(RunningState::SignedIn(
            SignedInViewControllerState::WaitingForPickup,
            session.clone(),
        ));
        assert_eq!(
            MainViewState::selector().select(&signed_in),
            ScopedState::InScope(MainViewState::SignedIn(session))
        );
    }
}
