//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/observe diagnostic events emitted by resources and their fetch
//! drivers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] — event classification and payload metadata
//! - [`Bus`] — thin wrapper over `tokio::sync::broadcast`
//!
//! Events are observability only. The *state* of a resource travels through
//! its `watch` channel (see [`Resource::subscribe`](crate::Resource::subscribe));
//! the bus never carries loaded data or loader errors, only labels and
//! human-readable reasons.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
