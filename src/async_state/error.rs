//! Producer failure normalization and controller errors.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors returned by the controller itself (never by the producer).
#[derive(Debug, Error)]
pub enum AsyncStateError {
    /// Detached or immediate execution needs a Tokio runtime to spawn on.
    #[error("No Tokio runtime available to spawn the execution: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// A normalized producer failure.
///
/// Cloning is cheap and keeps identity: the value stored in the controller's
/// `error` projection and the one passed to `on_error` are the same error,
/// which [`AsyncError::same_as`] can confirm.
#[derive(Clone)]
pub struct AsyncError {
    inner: Arc<anyhow::Error>,
}

impl AsyncError {
    /// Wrap an error value unchanged. Its concrete type stays reachable via
    /// [`AsyncError::downcast_ref`].
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            inner: Arc::new(error.into()),
        }
    }

    /// Wrap a non-error value as a new error carrying its string form.
    pub fn msg(value: impl fmt::Display) -> Self {
        Self {
            inner: Arc::new(anyhow::Error::msg(value.to_string())),
        }
    }

    /// Normalize a panic payload caught from the producer.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        if let Some(message) = payload.downcast_ref::<&'static str>() {
            Self::msg(message)
        } else if let Some(message) = payload.downcast_ref::<String>() {
            Self::msg(message)
        } else {
            Self::msg("producer panicked")
        }
    }

    pub fn message(&self) -> String {
        self.inner.to_string()
    }

    /// Access the original error if it was of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// True if both handles refer to the same failure.
    pub fn same_as(&self, other: &AsyncError) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for AsyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl fmt::Debug for AsyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl std::error::Error for AsyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&**self.inner)
    }
}

impl Serialize for AsyncError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message())
    }
}
