//! Pick-me-up view projection.
//!
//! The screen shows one view at a time, derived from two independent facets
//! of [`PickMeUpViewControllerState`]: the flow arm and the ride request
//! sending state. A request in flight overrides the flow arm completely.

use crate::ui::app_state::{
    NewRideRequest, NewRideRequestSendingState, PickMeUpState, PickMeUpViewControllerState,
};
use crate::ui::mvi::UiState;

/// The view the pick-me-up screen presents.
///
/// Equality covers the carried request, so two sends of different requests
/// are distinct views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickMeUpView {
    Initial,
    SelectDropoffLocation,
    SelectRideOption,
    ConfirmRequest,
    SendingRideRequest(NewRideRequest),
    Final,
}

impl UiState for PickMeUpView {}

/// Merge the flow arm with the sending state.
pub fn project(state: &PickMeUpState, sending: &NewRideRequestSendingState) -> PickMeUpView {
    if let NewRideRequestSendingState::Sending(request) = sending {
        return PickMeUpView::SendingRideRequest(request.clone());
    }
    match state {
        PickMeUpState::Initial => PickMeUpView::Initial,
        PickMeUpState::SelectDropoffLocation(_) => PickMeUpView::SelectDropoffLocation,
        PickMeUpState::SelectRideOption(_, false) => PickMeUpView::SelectRideOption,
        PickMeUpState::SelectRideOption(_, true) => PickMeUpView::ConfirmRequest,
        PickMeUpState::Final => PickMeUpView::Final,
    }
}

impl PickMeUpView {
    pub fn from_state(state: &PickMeUpViewControllerState) -> Self {
        project(&state.state, &state.sending_state)
    }
}
