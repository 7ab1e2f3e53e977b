//! # Cancelable fetches.
//!
//! This module provides the cancellation primitive of the crate:
//! - [`CancelableFetch`] - a spawned operation whose outcome can be suppressed
//! - [`CancelHandle`] - the control used to mark a fetch stale

mod cancelable;

pub use cancelable::{CancelHandle, CancelableFetch};
