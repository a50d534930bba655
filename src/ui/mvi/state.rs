//! Base trait for UI state in the unidirectional data flow.

/// Marker trait for UI state objects and the facets derived from them.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes)
/// - Shareable across the delivery context (Send + Sync)
pub trait UiState: Clone + PartialEq + Send + Sync + 'static {}

impl UiState for bool {}
impl UiState for String {}
