use std::fmt;
use std::sync::Arc;

use crate::async_state::error::AsyncError;
use crate::config::Defaults;

/// Callback invoked once per failed execution.
pub type ErrorCallback = Arc<dyn Fn(&AsyncError) + Send + Sync>;

/// Options captured once when an [`AsyncState`](super::AsyncState) is built.
pub struct AsyncStateOptions<T> {
    /// Start one execution during construction (default: true).
    pub immediate: bool,
    /// Value of `data` until the first successful execution.
    pub initial_state: Option<T>,
    /// Called with the normalized error after every failure.
    pub on_error: Option<ErrorCallback>,
}

impl<T> Default for AsyncStateOptions<T> {
    fn default() -> Self {
        Self {
            immediate: true,
            initial_state: None,
            on_error: None,
        }
    }
}

impl<T> AsyncStateOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    pub fn initial_state(mut self, value: T) -> Self {
        self.initial_state = Some(value);
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&AsyncError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }
}

impl<T> From<&Defaults> for AsyncStateOptions<T> {
    fn from(defaults: &Defaults) -> Self {
        Self {
            immediate: defaults.immediate,
            ..Self::default()
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AsyncStateOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncStateOptions")
            .field("immediate", &self.immediate)
            .field("initial_state", &self.initial_state)
            .field("on_error", &self.on_error.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
