//! Observable state cells.
//!
//! A [`StateCell`] is owned by whoever is allowed to mutate the value. Every
//! write is published twice: through a `tokio::sync::watch` channel for async
//! observers, and to synchronous callbacks registered with
//! [`ReadOnly::subscribe`]. Readers only ever get a [`ReadOnly`] projection.
//!
//! ```text
//! StateCell ──set──→ watch channel ──→ ReadOnly::changed / wait_for
//!     │
//!     └──notify──→ subscribed callbacks (in subscription order)
//! ```

mod cell;
mod projection;

pub use cell::StateCell;
pub use projection::{ReadOnly, Subscription};
