//! # Non-blocking event fan-out to multiple observers.
//!
//! [`ObserverSet`] distributes events to multiple observers concurrently
//! without blocking the publisher.
//!
//! ```text
//! emit(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► observer1.on_event()
//!     ├──► [queue 2] ──► worker 2 ──► observer2.on_event()
//!     └──► [queue N] ──► worker N ──► observerN.on_event()
//! ```
//!
//! ## Rules
//! - **Per-observer FIFO**: each observer sees events in publish order.
//! - **No cross-observer ordering**: observer A may process event N while B
//!   is still on N-5.
//! - **Overflow**: the event is dropped for that observer only and an
//!   `ObserverOverflow` event is published (unless the dropped event was
//!   itself an overflow report, to avoid feedback).
//! - **Isolation**: a slow or panicking observer affects nobody else. Worker
//!   panics are caught, reported as `ObserverPanicked`, and the worker keeps
//!   processing.
//!
//! Workers exit when the set is dropped (their queue senders close).

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::core::panic_message;
use crate::events::{Bus, Event};
use crate::observers::Observer;

/// Per-observer channel metadata.
struct ObserverChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for multiple event observers.
pub struct ObserverSet {
    channels: Vec<ObserverChannel>,
    bus: Bus,
}

impl ObserverSet {
    /// Creates a new set and spawns one worker task per observer.
    ///
    /// Each observer gets a bounded queue (capacity from
    /// [`Observer::queue_capacity`], min 1) and a dedicated worker that runs
    /// until the queue closes. Delivery problems are published back to `bus`.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn Observer>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(observers.len());

        for observer in observers {
            let name = observer.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(observer.queue_capacity().max(1));
            let worker_bus = bus.clone();

            tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let handled = AssertUnwindSafe(observer.on_event(ev.as_ref()))
                        .catch_unwind()
                        .await;
                    if let Err(panic) = handled {
                        worker_bus.publish(Event::observer_panicked(
                            observer.name(),
                            panic_message(panic.as_ref()),
                        ));
                    }
                }
            });
            channels.push(ObserverChannel { name, sender: tx });
        }
        Self { channels, bus }
    }

    /// Delivers an event to every observer queue without blocking.
    ///
    /// A full or closed queue drops the event for that observer only.
    pub fn emit(&self, ev: &Event) {
        let ev = Arc::new(ev.clone());
        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&ev)) {
                Ok(()) => {}
                Err(TrySendError::Full(dropped)) => self.report_drop(channel.name, &dropped, "full"),
                Err(TrySendError::Closed(dropped)) => {
                    self.report_drop(channel.name, &dropped, "closed");
                }
            }
        }
    }

    /// Returns how many observers are attached.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Returns `true` when no observers are attached.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    fn report_drop(&self, observer: &'static str, dropped: &Event, reason: &'static str) {
        // Dropping an overflow report must not generate another one.
        if !dropped.is_observer_overflow() {
            self.bus.publish(Event::observer_overflow(observer, reason));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::time::sleep;

    use crate::events::EventKind;

    struct Counter {
        count: AtomicUsize,
    }

    #[async_trait]
    impl Observer for Counter {
        async fn on_event(&self, _event: &Event) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "counter"
        }
    }

    struct Faulty;

    #[async_trait]
    impl Observer for Faulty {
        async fn on_event(&self, _event: &Event) {
            panic!("observer bug");
        }

        fn name(&self) -> &'static str {
            "faulty"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_reach_every_observer_in_order() {
        let bus = Bus::new(16);
        let counter = Arc::new(Counter {
            count: AtomicUsize::new(0),
        });
        let set = ObserverSet::new(vec![counter.clone()], bus.clone());

        for _ in 0..3 {
            set.emit(&Event::new(EventKind::LoadStarting));
        }
        sleep(Duration::from_millis(5)).await;

        assert_eq!(counter.count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_observer_is_isolated_and_reported() {
        let bus = Bus::new(16);
        let mut events = bus.subscribe();
        let counter = Arc::new(Counter {
            count: AtomicUsize::new(0),
        });
        let set = ObserverSet::new(vec![Arc::new(Faulty), counter.clone()], bus.clone());

        set.emit(&Event::new(EventKind::LoadReady));
        sleep(Duration::from_millis(5)).await;

        // The healthy observer still got the event.
        assert_eq!(counter.count.load(Ordering::SeqCst), 1);

        // And the panic was reported on the bus.
        let mut reported = false;
        while let Ok(ev) = events.try_recv() {
            if ev.is_observer_panic() && ev.resource.as_deref() == Some("faulty") {
                reported = true;
            }
        }
        assert!(reported, "expected an ObserverPanicked event");
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_survives_a_panic() {
        let bus = Bus::new(16);
        let set = ObserverSet::new(vec![Arc::new(Faulty)], bus.clone());
        let mut events = bus.subscribe();

        set.emit(&Event::new(EventKind::LoadReady));
        set.emit(&Event::new(EventKind::LoadFailed));
        sleep(Duration::from_millis(5)).await;

        let panics = std::iter::from_fn(|| events.try_recv().ok())
            .filter(Event::is_observer_panic)
            .count();
        assert_eq!(panics, 2, "worker must keep processing after a panic");
    }
}
