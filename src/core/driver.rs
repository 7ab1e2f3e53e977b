//! # Drive one fetch to its outcome and publish it — or discard it as stale.
//!
//! One driver task runs per started fetch. It awaits the fetch's outcome and
//! then, under the resource lock, decides what (if anything) to publish:
//!
//! ```text
//! Outcome            still current?   published state   published event
//! ─────────────────  ──────────────   ───────────────   ────────────────
//! Ok(value)          yes              Ready(value)      LoadReady
//! Failed(error)      yes              Failed(error)     LoadFailed
//! Canceled           —                none              LoadCanceled
//! any                no (stale)       none              LoadCanceled
//! panic              —                none              FetchPanicked
//! ```
//!
//! ## Rules
//! - Exactly one terminal event per fetch.
//! - The generation/closed re-check happens under the same lock that
//!   restarts take, so a stale driver can never publish after a newer
//!   fetch has started.
//! - Loader errors are published verbatim as state; the event carries only
//!   their rendered text.

use std::any::Any;
use std::fmt::Display;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::core::resource::Shared;
use crate::error::FetchError;
use crate::events::{Bus, Event, EventKind};
use crate::fetch::CancelableFetch;
use crate::state::LoadState;

/// Awaits `fetch` and publishes its outcome for generation `generation` of
/// the resource, unless the fetch went stale in the meantime.
pub(super) async fn drive<T, E>(
    shared: Arc<Shared<T, E>>,
    bus: Bus,
    resource: Arc<str>,
    generation: u64,
    fetch: CancelableFetch<T, E>,
) where
    T: Send + Sync + 'static,
    E: Display + Send + Sync + 'static,
{
    let outcome = match AssertUnwindSafe(fetch.outcome()).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(panic) => {
            bus.publish(
                Event::new(EventKind::FetchPanicked)
                    .with_resource(resource)
                    .with_generation(generation)
                    .with_reason(panic_message(panic.as_ref())),
            );
            return;
        }
    };

    // Publication and restart contend on the same lock; whoever wins, the
    // generation check below stays consistent with it.
    let live = match shared.live.lock() {
        Ok(live) => live,
        Err(_) => return,
    };
    if live.closed || live.generation != generation {
        bus.publish(stale(resource, generation));
        return;
    }

    match outcome {
        Ok(value) => {
            shared.state.send_replace(LoadState::Ready(value));
            bus.publish(
                Event::new(EventKind::LoadReady)
                    .with_resource(resource)
                    .with_generation(generation),
            );
        }
        Err(FetchError::Canceled) => {
            bus.publish(stale(resource, generation));
        }
        Err(FetchError::Failed(error)) => {
            let reason = error.to_string();
            shared.state.send_replace(LoadState::Failed(error));
            bus.publish(
                Event::new(EventKind::LoadFailed)
                    .with_resource(resource)
                    .with_generation(generation)
                    .with_reason(reason),
            );
        }
    }
}

fn stale(resource: Arc<str>, generation: u64) -> Event {
    Event::new(EventKind::LoadCanceled)
        .with_resource(resource)
        .with_generation(generation)
}

/// Extracts a readable message from a caught panic payload.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
