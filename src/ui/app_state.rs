//! Application state tree.
//!
//! The external producer owns and replaces [`AppState`]; the observation core
//! only reads snapshots of it. Each flow is a nested sum type whose arms carry
//! the state of the screen shown for that arm.

use uuid::Uuid;

use crate::ui::mvi::UiState;

/// Root of the application state.
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Launching(LaunchViewControllerState),
    Running(RunningState),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunningState {
    Onboarding(OnboardingState),
    SignedIn(SignedInViewControllerState, UserSession),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OnboardingState {
    Welcoming,
    SigningIn(SignInViewControllerState),
    SigningUp,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Launching(LaunchViewControllerState::default())
    }
}

impl UiState for AppState {}

// ---------------------------------------------------------------------------
// Shared value types
// ---------------------------------------------------------------------------

/// A user-facing error waiting to be presented.
///
/// Two messages with the same text are still distinct occurrences: equality
/// includes the id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorMessage {
    pub id: Uuid,
    pub title: String,
    pub message: String,
}

impl ErrorMessage {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
        }
    }
}

impl UiState for ErrorMessage {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub profile: UserProfile,
    pub auth_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedLocation {
    pub name: String,
    pub location: Location,
}

/// Screen-space rectangle, used for keyboard geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// ---------------------------------------------------------------------------
// Launch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaunchViewControllerState {
    pub errors_to_present: Vec<ErrorMessage>,
}

impl UiState for LaunchViewControllerState {}

// ---------------------------------------------------------------------------
// Sign in
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignInViewControllerState {
    pub view_state: SignInViewState,
    pub errors_to_present: Vec<ErrorMessage>,
}

impl UiState for SignInViewControllerState {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignInViewState {
    pub email_input_enabled: bool,
    pub password_input_enabled: bool,
    pub sign_in_button_enabled: bool,
    pub sign_in_activity_indicator_animating: bool,
}

impl SignInViewState {
    /// Form locked while a sign-in request is in flight.
    pub fn signing_in() -> Self {
        Self {
            email_input_enabled: false,
            password_input_enabled: false,
            sign_in_button_enabled: false,
            sign_in_activity_indicator_animating: true,
        }
    }
}

impl Default for SignInViewState {
    fn default() -> Self {
        Self {
            email_input_enabled: true,
            password_input_enabled: true,
            sign_in_button_enabled: true,
            sign_in_activity_indicator_animating: false,
        }
    }
}

impl UiState for SignInViewState {}

// ---------------------------------------------------------------------------
// Signed in / pick me up
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SignedInViewControllerState {
    GettingUsersLocation,
    RequestingNewRide(Location, PickMeUpViewControllerState),
    WaitingForPickup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickMeUpViewControllerState {
    pub pickup_location: Location,
    pub state: PickMeUpState,
    pub sending_state: NewRideRequestSendingState,
    pub should_display_where_to: bool,
    pub errors_to_present: Vec<ErrorMessage>,
    pub map_view_controller_state: MapViewControllerState,
}

impl PickMeUpViewControllerState {
    pub fn new(pickup_location: Location) -> Self {
        Self {
            pickup_location,
            state: PickMeUpState::Initial,
            sending_state: NewRideRequestSendingState::NotSending,
            should_display_where_to: true,
            errors_to_present: Vec::new(),
            map_view_controller_state: MapViewControllerState {
                pickup_location,
                dropoff_location: None,
            },
        }
    }
}

impl UiState for PickMeUpViewControllerState {}

/// Progress through the pick-me-up flow.
#[derive(Debug, Clone, PartialEq)]
pub enum PickMeUpState {
    Initial,
    SelectDropoffLocation(DropoffLocationPickerViewControllerState),
    /// `confirming_request` switches the ride-option arm into its
    /// confirmation sub-state.
    SelectRideOption(RideOptionPickerViewControllerState, bool),
    Final,
}

/// Whether a new ride request is currently being submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NewRideRequestSendingState {
    #[default]
    NotSending,
    Sending(NewRideRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRideRequest {
    pub pickup_name: String,
    pub dropoff_name: String,
    pub ride_option_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapViewControllerState {
    pub pickup_location: Location,
    pub dropoff_location: Option<Location>,
}

impl UiState for MapViewControllerState {}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DropoffLocationPickerViewControllerState {
    pub search_query: String,
    pub search_results: Vec<NamedLocation>,
}

impl UiState for DropoffLocationPickerViewControllerState {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideOption {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RideOptionPickerViewControllerState {
    pub pickup_location: Option<Location>,
    pub available: Vec<RideOption>,
    pub selected: Option<String>,
}

impl UiState for RideOptionPickerViewControllerState {}
