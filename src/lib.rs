//! # loadstate
//!
//! **loadstate** is a small library for cancelable asynchronous data loading.
//!
//! It provides a stateful [`Resource`] that owns exactly one in-flight fetch
//! at a time, publishes its status as a [`LoadState`], and discards the
//! outcome of any fetch that has gone stale — the classic request-race bug
//! (a slow page-1 response overwriting fast page-2 data) cannot happen.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//!     │  LoaderRef   │      │  LoaderRef   │      │  LoaderRef   │
//!     │ (screen #1)  │      │ (screen #2)  │      │ (screen #3)  │
//!     └──────┬───────┘      └──────┬───────┘      └──────┬───────┘
//!            ▼                     ▼                     ▼
//!     ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//!     │  Resource    │      │  Resource    │      │  Resource    │
//!     │  - watch tx ─┼─►    │  - watch tx ─┼─►    │  - watch tx ─┼─► LoadState
//!     │  - one live  │      │  - one live  │      │  - one live  │   consumers
//!     │    fetch     │      │    fetch     │      │    fetch     │
//!     └──────┬───────┘      └──────┬───────┘      └──────┬───────┘
//!            │ diagnostic events   │                     │
//!            ▼                     ▼                     ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                          Hub listener ──► ObserverSet
//!                                        ┌──────┼──────┐
//!                                        ▼      ▼      ▼
//!                                     logger inflight custom
//! ```
//!
//! ### Fetch lifecycle
//! ```text
//! Resource::new(loader) / set_loader(other) / reload()
//!   ├─► cancel current fetch (its outcome is now stale)
//!   ├─► generation += 1
//!   ├─► CancelableFetch::spawn(loader.fetch())
//!   ├─► publish LoadState::Pending        (synchronous)
//!   └─► driver task awaits the outcome:
//!         ├─ Ok(v)       & still current ─► publish Ready(v)
//!         ├─ Failed(e)   & still current ─► publish Failed(e), e verbatim
//!         ├─ Canceled or stale           ─► publish nothing (event only)
//!         └─ panic                       ─► publish nothing (event only)
//! ```
//!
//! ## Features
//! | Area            | Description                                             | Key types / traits                |
//! |-----------------|---------------------------------------------------------|-----------------------------------|
//! | **Resources**   | One live fetch, observable state, identity-based restart| [`Resource`], [`LoadState`]       |
//! | **Loaders**     | Named, zero-argument data sources                       | [`Loader`], [`LoaderFn`], [`LoaderRef`] |
//! | **Cancellation**| Advisory, result-filtering fetch cancellation           | [`CancelableFetch`], [`CancelHandle`], [`FetchError`] |
//! | **Observability**| Diagnostic events with pluggable observers             | [`Hub`], [`Bus`], [`Event`], [`Observer`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## What this crate does not do
//! No retry (replace the loader or call [`Resource::reload`]), no timeout
//! (compose one into the loader), no caching beyond the single in-flight
//! fetch, no request batching. A hung loader leaves its resource `Pending`.
//!
//! ## Example
//! ```rust
//! use loadstate::{LoaderFn, LoaderRef, LoadState, Resource};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let loader: LoaderRef<Vec<String>, String> = LoaderFn::arc("articles", || async {
//!         // call the API client here...
//!         Ok::<_, String>(vec!["how to train your borrow checker".to_string()])
//!     });
//!
//!     let articles = Resource::new(loader);
//!     let mut rx = articles.subscribe();
//!
//!     // Pending first, always.
//!     assert!(rx.borrow().is_pending());
//!
//!     let settled = rx.wait_for(|s| !s.is_pending()).await.unwrap();
//!     match &*settled {
//!         LoadState::Ready(items) => assert_eq!(items.len(), 1),
//!         LoadState::Failed(err) => eprintln!("load failed: {err}"),
//!         LoadState::Pending => unreachable!(),
//!     }
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod fetch;
mod loaders;
mod observers;
mod state;

// ---- Public re-exports ----

pub use crate::core::{Hub, Resource};
pub use config::Config;
pub use error::FetchError;
pub use events::{Bus, Event, EventKind};
pub use fetch::{CancelHandle, CancelableFetch};
pub use loaders::{BoxLoadFuture, Loader, LoaderFn, LoaderRef};
pub use observers::{InflightTracker, Observer, ObserverSet};
pub use state::LoadState;

// Optional: expose a simple built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
