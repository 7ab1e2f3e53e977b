//! # Event bus for broadcasting diagnostic events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that lets
//! multiple publishers (resources, fetch drivers, observer workers) emit
//! events without blocking, and any number of receivers observe them.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or awaits.
//! - **Bounded capacity**: a single ring buffer stores recent events for all
//!   receivers; the minimum capacity is 1 (clamped).
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip the
//!   `n` oldest items.
//! - **No persistence**: events published while there are no receivers are
//!   dropped.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for diagnostic events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender); clones publish
/// into the same ring buffer. Fire-and-forget: there are no delivery or
/// durability guarantees.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to ≥ 1).
    ///
    /// Capacity is shared across all receivers, not per-receiver. Receivers
    /// that fall more than `capacity` events behind observe
    /// `RecvError::Lagged` on their next `recv()`.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers the event is dropped; this function still
    /// returns immediately.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that observes subsequent events.
    ///
    /// Each call creates an independent receiver; a receiver only gets events
    /// sent *after* it subscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for Bus {
    /// A bus with the default capacity from [`Config`](crate::Config).
    fn default() -> Self {
        Bus::new(crate::config::Config::default().bus_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::LoadStarting).with_resource("feed"));

        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::LoadStarting);
        assert_eq!(ev.resource.as_deref(), Some("feed"));
    }

    #[tokio::test]
    async fn test_publish_without_receivers_is_dropped() {
        let bus = Bus::new(8);
        bus.publish(Event::new(EventKind::LoadReady));
        // Subscribing afterwards must not replay the earlier event.
        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::LoadFailed));
        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::LoadFailed);
    }

    #[test]
    fn test_capacity_is_clamped() {
        // Must not panic on a zero capacity.
        let _ = Bus::new(0);
    }
}
