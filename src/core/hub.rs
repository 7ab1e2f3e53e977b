//! # Hub: shared bus plus observer fan-out.
//!
//! A [`Hub`] owns an event [`Bus`] and an [`ObserverSet`], and runs the
//! background listener that forwards every bus event to the set. Resources
//! created through [`Hub::resource`] publish their diagnostic events to the
//! shared bus, so one set of observers (logging, inflight tracking, metrics)
//! covers all of them.
//!
//! ## Wiring
//! ```text
//! Resource A ──┐
//! Resource B ──┼── publish(Event) ──► Bus ──► listener ──► ObserverSet
//! Resource N ──┘                                ┌─────────┼─────────┐
//!                                               ▼         ▼         ▼
//!                                           observer1  observer2  observerN
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use loadstate::{Config, Hub, InflightTracker, LoaderFn, LoaderRef, Observer};
//!
//! # async fn demo() {
//! let inflight = Arc::new(InflightTracker::new());
//! let observers: Vec<Arc<dyn Observer>> = vec![inflight.clone()];
//! let hub = Hub::new(Config::default(), observers);
//!
//! let loader: LoaderRef<String, String> = LoaderFn::arc("profile", || async {
//!     Ok::<_, String>("jane".to_string())
//! });
//! let profile = hub.resource(loader);
//! # let _ = profile;
//! # }
//! ```

use std::fmt::Display;
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;

use crate::config::Config;
use crate::core::Resource;
use crate::events::Bus;
use crate::loaders::LoaderRef;
use crate::observers::{Observer, ObserverSet};

/// Shared observability context for a set of resources.
pub struct Hub {
    cfg: Config,
    bus: Bus,
    observers: Arc<ObserverSet>,
}

impl Hub {
    /// Creates a hub with the given config and observers, and starts the
    /// bus-to-observers listener.
    ///
    /// Must be called within a Tokio runtime.
    pub fn new(cfg: Config, observers: Vec<Arc<dyn Observer>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let observers = Arc::new(ObserverSet::new(observers, bus.clone()));
        let hub = Self {
            cfg,
            bus,
            observers,
        };
        hub.observer_listener();
        hub
    }

    /// Creates a resource publishing to this hub's bus.
    pub fn resource<T, E>(&self, loader: LoaderRef<T, E>) -> Resource<T, E>
    where
        T: Send + Sync + 'static,
        E: Display + Send + Sync + 'static,
    {
        Resource::with_bus(loader, self.bus.clone())
    }

    /// Returns the shared event bus.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Returns the hub configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Subscribes to the bus and forwards events to the observer set.
    ///
    /// Laggards skip missed events and keep listening; the listener exits
    /// when the bus closes.
    fn observer_listener(&self) {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.observers);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => set.emit(&ev),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }
}
