use serde::Serialize;

use crate::async_state::error::AsyncError;

/// Coarse lifecycle of a controller, derived from its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AsyncStatus {
    /// Nothing has succeeded or failed yet.
    Idle,
    Loading,
    Success,
    Error,
}

impl AsyncStatus {
    pub(crate) fn derive(is_loading: bool, has_error: bool, has_succeeded: bool) -> Self {
        if is_loading {
            Self::Loading
        } else if has_error {
            Self::Error
        } else if has_succeeded {
            Self::Success
        } else {
            Self::Idle
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

/// Point-in-time copy of a controller's three projections.
#[derive(Debug, Clone, Serialize)]
pub struct AsyncSnapshot<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<AsyncError>,
}
