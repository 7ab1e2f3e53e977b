//! # Diagnostic events emitted by resources and fetch drivers.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Fetch lifecycle**: a fetch starting, settling, or being discarded
//!   as stale (`LoadStarting`, `LoadReady`, `LoadFailed`, `LoadCanceled`,
//!   `FetchPanicked`)
//! - **Resource lifecycle**: teardown (`ResourceClosed`)
//! - **Observer delivery**: fan-out problems (`ObserverPanicked`,
//!   `ObserverOverflow`)
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use loadstate::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::LoadFailed)
//!     .with_resource("articles")
//!     .with_generation(3)
//!     .with_reason("503 service unavailable");
//!
//! assert_eq!(ev.kind, EventKind::LoadFailed);
//! assert_eq!(ev.resource.as_deref(), Some("articles"));
//! assert_eq!(ev.generation, Some(3));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of diagnostic events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A fetch was started for a resource.
    ///
    /// Sets:
    /// - `resource`: resource name
    /// - `generation`: fetch generation (1-based, per resource)
    LoadStarting,

    /// The current fetch settled successfully and its data was published.
    ///
    /// Sets:
    /// - `resource`: resource name
    /// - `generation`: fetch generation
    LoadReady,

    /// The current fetch failed and the loader's error was published.
    ///
    /// Sets:
    /// - `resource`: resource name
    /// - `generation`: fetch generation
    /// - `reason`: loader error text
    LoadFailed,

    /// A stale fetch settled and its outcome was discarded.
    ///
    /// Emitted when a fetch was superseded by a newer one or invalidated by
    /// teardown. Whatever the underlying operation produced, nothing was
    /// published.
    ///
    /// Sets:
    /// - `resource`: resource name
    /// - `generation`: the *stale* fetch's generation
    LoadCanceled,

    /// The spawned fetch panicked; no state was published.
    ///
    /// Sets:
    /// - `resource`: resource name
    /// - `generation`: fetch generation
    /// - `reason`: panic info/message
    FetchPanicked,

    /// The resource was dropped; no further state transitions will occur.
    ///
    /// Sets:
    /// - `resource`: resource name
    ResourceClosed,

    /// An observer panicked while processing an event.
    ///
    /// Sets:
    /// - `resource`: observer name
    /// - `reason`: panic info/message
    ObserverPanicked,

    /// An observer dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `resource`: observer name
    /// - `reason`: reason string (e.g., "full", "closed")
    ObserverOverflow,
}

/// Diagnostic event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the resource (or observer, for delivery events), if applicable.
    pub resource: Option<Arc<str>>,
    /// Fetch generation the event refers to (1-based, per resource).
    pub generation: Option<u64>,
    /// Human-readable reason (loader errors, panic info, overflow details).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            resource: None,
            generation: None,
            reason: None,
        }
    }

    /// Attaches a resource (or observer) name.
    #[inline]
    pub fn with_resource(mut self, resource: impl Into<Arc<str>>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Attaches a fetch generation.
    #[inline]
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = Some(generation);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates an observer overflow event.
    #[inline]
    pub fn observer_overflow(observer: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::ObserverOverflow)
            .with_resource(observer)
            .with_reason(reason)
    }

    /// Creates an observer panic event.
    #[inline]
    pub fn observer_panicked(observer: &'static str, info: String) -> Self {
        Event::new(EventKind::ObserverPanicked)
            .with_resource(observer)
            .with_reason(info)
    }

    #[inline]
    pub fn is_observer_overflow(&self) -> bool {
        matches!(self.kind, EventKind::ObserverOverflow)
    }

    #[inline]
    pub fn is_observer_panic(&self) -> bool {
        matches!(self.kind, EventKind::ObserverPanicked)
    }
}
