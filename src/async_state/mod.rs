//! Loading/error bookkeeping around an async producer.
//!
//! ```text
//! execute() ─→ is_loading = true ─→ error = None ─→ producer()
//!                                                      │ await
//!                       ┌──────────────────────────────┴─────────┐
//!                   Ok(value)                                 failure
//!                  data = value                  error = normalized, on_error()
//!                       └──────────────→ is_loading = false ←────┘
//! ```
//!
//! Failures never escape `execute`: returned errors, and panics raised
//! by the producer, are normalized into an [`AsyncError`].

mod controller;
mod error;
mod options;
mod snapshot;

pub use controller::{AsyncState, Completion};
pub use error::{AsyncError, AsyncStateError};
pub use options::{AsyncStateOptions, ErrorCallback};
pub use snapshot::{AsyncSnapshot, AsyncStatus};
