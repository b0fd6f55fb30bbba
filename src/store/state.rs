//! Base trait for store state.

/// Marker trait for state held by a [`Store`](super::Store).
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (everything a view needs to render)
/// - Comparable (PartialEq so unchanged states are not republished)
pub trait StoreState: Clone + PartialEq + Default + Send + Sync + 'static {}
