//! # Runtime configuration.
//!
//! Provides [`Config`], the settings shared by a [`Hub`](crate::Hub) and the
//! resources attached to it.
//!
//! There is deliberately little to configure: retry, backoff, and timeouts
//! are not features of this crate (compose a timeout into the loader if you
//! need one), so the only knob is the event-bus capacity.

/// Configuration for a hub and its event bus.
///
/// ## Field semantics
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by
///   [`Bus`](crate::Bus))
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers that lag behind more than `bus_capacity` events skip the
    /// oldest items. The minimum value is 1.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration: `bus_capacity = 256`.
    fn default() -> Self {
        Self { bus_capacity: 256 }
    }
}
