//! # Resource: one live fetch, one observable state.
//!
//! A [`Resource`] owns at most one in-flight [`CancelableFetch`] at a time
//! and publishes a [`LoadState`] on every transition. It exists to make one
//! guarantee: **only the outcome of the most recently started fetch can ever
//! reach the published state.** A slow page-1 fetch settling after a fast
//! page-2 fetch must not overwrite the newer data.
//!
//! ## State machine
//! ```text
//! new(loader) ──► Pending ──► fetch settles Ok(v)   ──► Ready(v)
//!                   │    └──► fetch settles Err(e)  ──► Failed(e)
//!                   │
//!                   │  set_loader(other) / reload()
//!                   └◄── cancel current fetch, bump generation,
//!                        start new fetch, publish Pending again
//!
//! drop(resource) ──► cancel current fetch; no further publications
//! ```
//!
//! ## Rules
//! - `Pending` is published synchronously on construction and on every
//!   restart, before the new fetch can settle.
//! - Restarts cancel-then-start inside one critical section; a stale fetch's
//!   driver re-checks the generation under the same lock before publishing,
//!   so out-of-order publication is impossible.
//! - [`set_loader`](Resource::set_loader) compares loaders by `Arc` identity.
//!   The same handle is a no-op (no re-fetch, state retained); a different
//!   handle restarts. Captured parameters are never compared.
//! - A stale fetch's settlement — success or failure — is discarded and
//!   reported only as a [`EventKind::LoadCanceled`](crate::EventKind) event.

use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

use crate::core::driver;
use crate::events::{Bus, Event, EventKind};
use crate::fetch::{CancelHandle, CancelableFetch};
use crate::loaders::LoaderRef;
use crate::state::LoadState;

/// The record of the currently owned fetch. All mutation happens under the
/// [`Shared::live`] mutex.
pub(super) struct Live<T, E> {
    /// Loader that started the current fetch; the identity `set_loader`
    /// compares against.
    pub(super) loader: LoaderRef<T, E>,
    /// Cancel control of the current fetch.
    pub(super) cancel: CancelHandle,
    /// Bumped on every restart; a driver may publish only while its
    /// generation is still current.
    pub(super) generation: u64,
    /// Set on teardown; no publication may happen afterwards.
    pub(super) closed: bool,
}

/// State shared between a resource and its fetch drivers.
pub(super) struct Shared<T, E> {
    pub(super) state: watch::Sender<LoadState<T, E>>,
    pub(super) live: Mutex<Live<T, E>>,
}

/// A stateful unit owning one cancelable fetch at a time.
///
/// Consumers observe the state through [`subscribe`](Resource::subscribe)
/// (awaitable) or [`state`](Resource::state) (snapshot). Diagnostic events go
/// to the [`Bus`] the resource was created with.
///
/// # Example
/// ```
/// use loadstate::{LoaderFn, LoaderRef, LoadState, Resource};
///
/// # async fn demo() {
/// let loader: LoaderRef<Vec<String>, String> = LoaderFn::arc("articles", || async {
///     // call the API client here...
///     Ok::<_, String>(vec!["hello".to_string()])
/// });
/// let articles = Resource::new(loader);
///
/// let mut rx = articles.subscribe();
/// assert!(rx.borrow().is_pending());
///
/// let ready = rx.wait_for(|s| !s.is_pending()).await.unwrap();
/// assert!(matches!(&*ready, LoadState::Ready(items) if items.len() == 1));
/// # }
/// ```
pub struct Resource<T, E> {
    name: Arc<str>,
    bus: Bus,
    shared: Arc<Shared<T, E>>,
}

impl<T, E> Resource<T, E>
where
    T: Send + Sync + 'static,
    E: Display + Send + Sync + 'static,
{
    /// Creates a resource and starts its first fetch.
    ///
    /// `Pending` is observable immediately, before the fetch can settle.
    /// Diagnostic events go to a private default [`Bus`]; use
    /// [`with_bus`](Resource::with_bus) (or [`Hub::resource`](crate::Hub::resource))
    /// to share one.
    ///
    /// Must be called within a Tokio runtime.
    pub fn new(loader: LoaderRef<T, E>) -> Self {
        Self::with_bus(loader, Bus::default())
    }

    /// Creates a resource publishing its diagnostic events to `bus`.
    pub fn with_bus(loader: LoaderRef<T, E>, bus: Bus) -> Self {
        let name: Arc<str> = Arc::from(loader.name());
        let (state, _) = watch::channel(LoadState::Pending);

        let fetch = CancelableFetch::spawn(loader.fetch());
        let shared = Arc::new(Shared {
            state,
            live: Mutex::new(Live {
                loader,
                cancel: fetch.cancel_handle(),
                generation: 1,
                closed: false,
            }),
        });

        bus.publish(
            Event::new(EventKind::LoadStarting)
                .with_resource(name.clone())
                .with_generation(1),
        );
        tokio::spawn(driver::drive(
            Arc::clone(&shared),
            bus.clone(),
            name.clone(),
            1,
            fetch,
        ));

        Self { name, bus, shared }
    }

    /// Replaces the loader, restarting the fetch **only if the identity
    /// changed**.
    ///
    /// Identity is `Arc` pointer identity: clones of one [`LoaderRef`] are
    /// the same loader, and passing one back is a no-op — the current state
    /// is retained and no new fetch starts. A different handle cancels the
    /// current fetch, starts a new one, and publishes `Pending` before this
    /// call returns.
    ///
    /// Captured parameters are never inspected: a freshly built loader that
    /// happens to be equivalent still counts as *different* and refetches.
    /// Keep and clone the original handle when you do not want a restart.
    pub fn set_loader(&self, loader: LoaderRef<T, E>) {
        let mut live = self.live();
        if live.closed || Arc::ptr_eq(&live.loader, &loader) {
            return;
        }
        self.restart_locked(&mut live, loader);
    }

    /// Restarts the fetch with the current loader.
    ///
    /// Cancels the in-flight fetch (if any), publishes `Pending`, and fetches
    /// again. For refresh-on-demand; loader identity is unchanged.
    pub fn reload(&self) {
        let mut live = self.live();
        if live.closed {
            return;
        }
        let loader = Arc::clone(&live.loader);
        self.restart_locked(&mut live, loader);
    }

    /// Returns a receiver observing every state transition.
    ///
    /// The receiver's [`borrow`](watch::Receiver::borrow) always reflects the
    /// latest published state; [`wait_for`](watch::Receiver::wait_for) awaits
    /// a transition of interest.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<T, E>> {
        self.shared.state.subscribe()
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> LoadState<T, E>
    where
        T: Clone,
        E: Clone,
    {
        self.shared.state.borrow().clone()
    }

    /// Returns the resource name (taken from the loader it was created with).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the loader whose fetch is currently owned.
    pub fn loader(&self) -> LoaderRef<T, E> {
        Arc::clone(&self.live().loader)
    }

    /// Returns the current fetch generation (1-based, bumped per restart).
    pub fn generation(&self) -> u64 {
        self.live().generation
    }

    /// Cancels the current fetch, starts a new one from `loader`, and
    /// publishes `Pending` — all within the caller's critical section, so a
    /// stale driver can never interleave a publication.
    fn restart_locked(&self, live: &mut MutexGuard<'_, Live<T, E>>, loader: LoaderRef<T, E>) {
        live.cancel.cancel();
        live.generation += 1;
        let generation = live.generation;

        let fetch = CancelableFetch::spawn(loader.fetch());
        live.cancel = fetch.cancel_handle();
        live.loader = loader;

        self.shared.state.send_replace(LoadState::Pending);
        self.bus.publish(
            Event::new(EventKind::LoadStarting)
                .with_resource(self.name.clone())
                .with_generation(generation),
        );
        tokio::spawn(driver::drive(
            Arc::clone(&self.shared),
            self.bus.clone(),
            self.name.clone(),
            generation,
            fetch,
        ));
    }

    fn live(&self) -> MutexGuard<'_, Live<T, E>> {
        // Publication sections never panic while holding the lock.
        self.shared.live.lock().unwrap()
    }
}

impl<T, E> Drop for Resource<T, E> {
    /// Tears the resource down: the in-flight fetch is marked stale and no
    /// state transition will ever be published again.
    fn drop(&mut self) {
        if let Ok(mut live) = self.shared.live.lock() {
            live.cancel.cancel();
            live.closed = true;
        }
        self.bus
            .publish(Event::new(EventKind::ResourceClosed).with_resource(self.name.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use tokio::sync::broadcast::Receiver;
    use tokio::time::sleep;

    use crate::loaders::LoaderFn;

    /// Drains every event already delivered to `rx`, returning the kinds
    /// (with generation, where set).
    fn drain(rx: &mut Receiver<Event>) -> Vec<(EventKind, Option<u64>)> {
        let mut seen = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            seen.push((ev.kind, ev.generation));
        }
        seen
    }

    #[tokio::test(start_paused = true)]
    async fn test_newest_fetch_wins_over_slow_stale_one() {
        let bus = Bus::new(64);
        let mut events = bus.subscribe();

        let page1: LoaderRef<&'static str, String> = LoaderFn::arc("feed", || async {
            sleep(Duration::from_millis(20)).await;
            Ok::<_, String>("page-1")
        });
        let page2: LoaderRef<&'static str, String> = LoaderFn::arc("feed", || async {
            sleep(Duration::from_millis(5)).await;
            Ok::<_, String>("page-2")
        });

        let feed = Resource::with_bus(page1, bus.clone());
        let mut rx = feed.subscribe();
        assert!(rx.borrow().is_pending());

        sleep(Duration::from_millis(5)).await;
        feed.set_loader(page2);
        // The restart is synchronous: Pending again before the new fetch
        // settles.
        assert!(rx.borrow().is_pending());

        rx.wait_for(|s| !s.is_pending()).await.unwrap();
        assert_eq!(*rx.borrow(), LoadState::Ready("page-2"));

        // Let the stale page-1 fetch settle; it must never publish.
        sleep(Duration::from_millis(30)).await;
        assert_eq!(*rx.borrow(), LoadState::Ready("page-2"));

        let seen = drain(&mut events);
        let ready_gens: Vec<_> = seen
            .iter()
            .filter(|(k, _)| *k == EventKind::LoadReady)
            .map(|(_, g)| g.unwrap())
            .collect();
        assert_eq!(ready_gens, vec![2], "only generation 2 may publish");
        assert!(
            seen.contains(&(EventKind::LoadCanceled, Some(1))),
            "the stale fetch is reported as canceled: {seen:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_suppresses_failure_outcome() {
        let bus = Bus::new(64);
        let mut events = bus.subscribe();

        let flaky: LoaderRef<u32, String> = LoaderFn::arc("flaky", || async {
            sleep(Duration::from_millis(10)).await;
            Err::<u32, _>("boom".to_string())
        });

        let res = Resource::with_bus(flaky, bus.clone());
        let mut rx = res.subscribe();

        sleep(Duration::from_millis(5)).await;
        drop(res);
        sleep(Duration::from_millis(20)).await;

        // The rejection settled after teardown and was discarded.
        assert!(rx.borrow().is_pending());
        let seen = drain(&mut events);
        assert!(seen.iter().all(|(k, _)| *k != EventKind::LoadFailed));
        assert!(seen.iter().any(|(k, _)| *k == EventKind::ResourceClosed));
        assert!(seen.iter().any(|(k, _)| *k == EventKind::LoadCanceled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_loader_identity_does_not_refetch() {
        let bus = Bus::new(64);
        let mut events = bus.subscribe();

        let calls = Arc::new(AtomicU32::new(0));
        let counted = calls.clone();
        let loader: LoaderRef<u32, String> = LoaderFn::arc("counter", move || {
            let n = counted.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok::<_, String>(n) }
        });

        let res = Resource::with_bus(Arc::clone(&loader), bus.clone());
        let mut rx = res.subscribe();
        rx.wait_for(|s| !s.is_pending()).await.unwrap();
        assert_eq!(*rx.borrow(), LoadState::Ready(1));

        // Same Arc identity: no restart, no state reset.
        res.set_loader(Arc::clone(&loader));
        tokio::task::yield_now().await;

        assert_eq!(*rx.borrow(), LoadState::Ready(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let starts = drain(&mut events)
            .iter()
            .filter(|(k, _)| *k == EventKind::LoadStarting)
            .count();
        assert_eq!(starts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_first_even_for_instant_loader() {
        let instant: LoaderRef<&'static str, String> =
            LoaderFn::arc("instant", || std::future::ready(Ok::<_, String>("x")));

        let res = Resource::new(instant);
        let mut rx = res.subscribe();
        // Before any await: the already-ready future has not been observed.
        assert!(rx.borrow().is_pending());

        rx.wait_for(|s| !s.is_pending()).await.unwrap();
        assert_eq!(*rx.borrow(), LoadState::Ready("x"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_before_settlement_prevents_publication() {
        let bus = Bus::new(64);
        let mut events = bus.subscribe();

        let slow: LoaderRef<u32, String> = LoaderFn::arc("slow", || async {
            sleep(Duration::from_millis(10)).await;
            Ok::<_, String>(7)
        });

        let res = Resource::with_bus(slow, bus.clone());
        let mut rx = res.subscribe();
        drop(res);

        sleep(Duration::from_millis(20)).await;
        assert!(rx.borrow().is_pending());
        let seen = drain(&mut events);
        assert!(seen.iter().all(|(k, _)| *k != EventKind::LoadReady));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loader_error_is_delivered_verbatim() {
        #[derive(Clone, Debug, PartialEq, Eq)]
        struct ApiError {
            status: u16,
            body: String,
        }
        impl fmt::Display for ApiError {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "status {}: {}", self.status, self.body)
            }
        }

        let failing: LoaderRef<u32, ApiError> = LoaderFn::arc("profile", || async {
            Err::<u32, _>(ApiError {
                status: 422,
                body: "email already taken".into(),
            })
        });

        let res = Resource::new(failing);
        let mut rx = res.subscribe();
        rx.wait_for(|s| !s.is_pending()).await.unwrap();
        assert_eq!(
            *rx.borrow(),
            LoadState::Failed(ApiError {
                status: 422,
                body: "email already taken".into(),
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reload_refetches_with_same_loader() {
        let calls = Arc::new(AtomicU32::new(0));
        let counted = calls.clone();
        let loader: LoaderRef<u32, String> = LoaderFn::arc("counter", move || {
            let n = counted.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok::<_, String>(n) }
        });

        let res = Resource::new(loader);
        let mut rx = res.subscribe();
        rx.wait_for(|s| !s.is_pending()).await.unwrap();
        assert_eq!(*rx.borrow(), LoadState::Ready(1));
        assert_eq!(res.generation(), 1);

        res.reload();
        // Synchronous reset, same identity kept.
        assert!(rx.borrow().is_pending());
        assert_eq!(res.generation(), 2);

        rx.wait_for(|s| !s.is_pending()).await.unwrap();
        assert_eq!(*rx.borrow(), LoadState::Ready(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_replacement_only_last_publishes() {
        let bus = Bus::new(64);
        let mut events = bus.subscribe();

        let make = |label: &'static str, delay_ms: u64| -> LoaderRef<&'static str, String> {
            LoaderFn::arc("burst", move || async move {
                sleep(Duration::from_millis(delay_ms)).await;
                Ok::<_, String>(label)
            })
        };

        let res = Resource::with_bus(make("first", 8), bus.clone());
        let mut rx = res.subscribe();
        res.set_loader(make("second", 6));
        res.set_loader(make("third", 4));
        res.set_loader(make("fourth", 2));

        sleep(Duration::from_millis(20)).await;
        assert_eq!(*rx.borrow(), LoadState::Ready("fourth"));

        let ready_gens: Vec<_> = drain(&mut events)
            .into_iter()
            .filter(|(k, _)| *k == EventKind::LoadReady)
            .map(|(_, g)| g.unwrap())
            .collect();
        assert_eq!(ready_gens, vec![4]);
    }
}
