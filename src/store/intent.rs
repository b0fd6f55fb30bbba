//! Base trait for intents dispatched to a store.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (increment, reset, set a value)
/// - System events (a fetch finished, a timer fired)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
