//! # Simple logging observer for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [starting] resource=articles gen=1
//! [ready] resource=articles gen=1
//! [failed] resource=articles gen=2 err="503 service unavailable"
//! [canceled] resource=articles gen=1
//! [closed] resource=articles
//! ```
//!
//! Enabled via the `logging` feature. Not intended for production use —
//! implement a custom [`Observer`] for structured logging or metrics.

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::observers::Observer;

/// Simple stdout logging observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Observer for LogWriter {
    async fn on_event(&self, e: &Event) {
        let resource = e.resource.as_deref().unwrap_or("?");
        match e.kind {
            EventKind::LoadStarting => {
                println!("[starting] resource={resource} gen={:?}", e.generation);
            }
            EventKind::LoadReady => {
                println!("[ready] resource={resource} gen={:?}", e.generation);
            }
            EventKind::LoadFailed => {
                println!(
                    "[failed] resource={resource} gen={:?} err={:?}",
                    e.generation, e.reason
                );
            }
            EventKind::LoadCanceled => {
                println!("[canceled] resource={resource} gen={:?}", e.generation);
            }
            EventKind::FetchPanicked => {
                println!(
                    "[fetch-panicked] resource={resource} gen={:?} info={:?}",
                    e.generation, e.reason
                );
            }
            EventKind::ResourceClosed => {
                println!("[closed] resource={resource}");
            }
            EventKind::ObserverPanicked => {
                println!("[observer-panicked] observer={resource} info={:?}", e.reason);
            }
            EventKind::ObserverOverflow => {
                println!("[observer-overflow] observer={resource} reason={:?}", e.reason);
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
