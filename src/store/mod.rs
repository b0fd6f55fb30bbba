//! Intent/reducer stores with observable state.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ subscribers
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Immutable value, republished only when it changes
//! - **Intent**: User actions or system events
//! - **Reducer**: Pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::StoreState;

use std::marker::PhantomData;

use crate::reactive::{ReadOnly, StateCell};

/// Holds the current state of reducer `R` and publishes every change.
pub struct Store<R: Reducer> {
    state: StateCell<R::State>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer> Store<R> {
    /// Create a store holding `R::State::default()`.
    pub fn new() -> Self {
        Self::with_state(R::State::default())
    }

    pub fn with_state(state: R::State) -> Self {
        Self {
            state: StateCell::new(state),
            _reducer: PhantomData,
        }
    }

    /// Reduce `intent` against the current state.
    ///
    /// Returns true if the state changed (and was published).
    pub fn dispatch(&self, intent: R::Intent) -> bool {
        self.state.replace_with(|state| R::reduce(state, intent))
    }

    /// Read-only projection of the state.
    pub fn state(&self) -> ReadOnly<R::State> {
        self.state.read_only()
    }

    /// Clone of the current state.
    pub fn current(&self) -> R::State {
        self.state.get()
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Reducer> std::fmt::Debug for Store<R>
where
    R::State: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state.get())
            .finish()
    }
}
