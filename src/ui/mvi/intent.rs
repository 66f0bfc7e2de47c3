//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents describe what happened (a sort header was clicked, a quick
/// filter toggled, a row clicked), never how the state should change.
pub trait Intent: Send + 'static {}
