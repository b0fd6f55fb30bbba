//! Reactive application state: an async loading/error controller, observable
//! state cells, and intent/reducer stores.
//!
//! ```no_run
//! use async_state::{AsyncState, AsyncStateOptions};
//!
//! # async fn demo() -> Result<(), async_state::AsyncStateError> {
//! let user = AsyncState::new(
//!     || async { Ok::<_, std::io::Error>("ada".to_string()) },
//!     AsyncStateOptions::default(),
//! )?;
//! assert!(user.is_loading().get());
//!
//! let settled = user.settled().await;
//! assert_eq!(settled.data.as_deref(), Some("ada"));
//! # Ok(())
//! # }
//! ```

pub mod async_state;
pub mod config;
pub mod counter;
pub mod logging;
pub mod reactive;
pub mod store;

pub use crate::async_state::{
    AsyncError, AsyncSnapshot, AsyncState, AsyncStateError, AsyncStateOptions, AsyncStatus,
    Completion,
};
pub use crate::counter::CounterStore;
pub use crate::reactive::{ReadOnly, StateCell, Subscription};
