//! # Event observers.
//!
//! This module provides the [`Observer`] trait and built-in implementations
//! for consuming diagnostic events broadcast through the
//! [`Bus`](crate::events::Bus).
//!
//! ## Contents
//! - [`Observer`] - contract for pluggable event consumers
//! - [`ObserverSet`] - non-blocking fan-out with per-observer queues
//! - [`InflightTracker`] - stateful observer tracking loading resources
//! - `LogWriter` - stdout logger for demos (feature `logging`)
//!
//! Observers see events, never states: loaded data and loader errors travel
//! only through each resource's watch channel.

mod inflight;
mod observer;
mod set;

#[cfg(feature = "logging")]
mod log;

pub use inflight::InflightTracker;
pub use observer::Observer;
pub use set::ObserverSet;

#[cfg(feature = "logging")]
pub use log::LogWriter;
