//! # Stateful observer that tracks currently loading resources.
//!
//! [`InflightTracker`] maintains an in-memory map of resources whose latest
//! fetch has started but not settled, by listening to load lifecycle events.
//!
//! Entries are keyed by fetch generation: when a fetch is superseded, its
//! eventual `LoadCanceled` event carries the *stale* generation and must not
//! clear the record of the newer fetch that is still in flight. Only the
//! event matching the recorded generation (or a teardown) removes an entry.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use loadstate::{Config, Hub, InflightTracker, Observer};
//!
//! # async fn demo() {
//! let inflight = Arc::new(InflightTracker::new());
//! let observers: Vec<Arc<dyn Observer>> = vec![inflight.clone()];
//! let hub = Hub::new(Config::default(), observers);
//!
//! // ... create resources through the hub ...
//!
//! let loading = inflight.snapshot().await;
//! println!("currently loading: {loading:?}");
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::events::{Event, EventKind};
use crate::observers::Observer;

/// Tracks which resources currently have a fetch in flight.
///
/// Thread-safe and cloneable — clones share the same internal state.
#[derive(Clone, Default)]
pub struct InflightTracker {
    /// resource name → generation of the fetch recorded as in flight
    inner: Arc<RwLock<HashMap<String, u64>>>,
}

impl InflightTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the names of resources currently loading, sorted.
    pub async fn snapshot(&self) -> Vec<String> {
        let map = self.inner.read().await;
        let mut names: Vec<String> = map.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns `true` if the named resource has a fetch in flight.
    pub async fn is_loading(&self, resource: &str) -> bool {
        self.inner.read().await.contains_key(resource)
    }
}

#[async_trait]
impl Observer for InflightTracker {
    async fn on_event(&self, event: &Event) {
        let Some(name) = event.resource.as_deref() else {
            return;
        };
        match event.kind {
            EventKind::LoadStarting => {
                if let Some(generation) = event.generation {
                    let mut map = self.inner.write().await;
                    let entry = map.entry(name.to_string()).or_insert(generation);
                    *entry = (*entry).max(generation);
                }
            }
            EventKind::LoadReady
            | EventKind::LoadFailed
            | EventKind::LoadCanceled
            | EventKind::FetchPanicked => {
                if let Some(generation) = event.generation {
                    let mut map = self.inner.write().await;
                    // A stale fetch settling must not clear the newer one.
                    if map.get(name) == Some(&generation) {
                        map.remove(name);
                    }
                }
            }
            EventKind::ResourceClosed => {
                self.inner.write().await.remove(name);
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "inflight_tracker"
    }
}
