//! Base trait for UI state.

/// Marker trait for UI state objects.
///
/// States are replaced, never mutated in place, and compare by value so a
/// caller can tell whether a dispatch changed anything.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
