//! # Demo: paging
//!
//! Reproduces the request race this crate exists to prevent: a slow page-1
//! fetch is superseded by a fast page-2 fetch, and its late result is
//! discarded instead of overwriting the newer data.
//!
//! ## Flow
//! ```text
//! t=0ms    resource starts fetching page 1 (takes 300ms)
//! t=50ms   user clicks "next page": set_loader(page 2) (takes 80ms)
//!            ├─► page-1 fetch canceled (result will be discarded)
//!            └─► state resets to Pending
//! t=130ms  page 2 arrives ──► Ready(page 2)
//! t=300ms  page 1 finally arrives ──► discarded, state stays Ready(page 2)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example paging --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use loadstate::{Config, Hub, LoadState, LoaderFn, LoaderRef, Observer};

fn page_loader(page: u32, delay: Duration) -> LoaderRef<Vec<String>, String> {
    LoaderFn::arc("articles", move || async move {
        tokio::time::sleep(delay).await;
        Ok::<_, String>((1..=3).map(|n| format!("p{page}-article-{n}")).collect())
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== paging example ===\n");

    #[cfg(feature = "logging")]
    let observers: Vec<Arc<dyn Observer>> = vec![Arc::new(loadstate::LogWriter::new())];
    #[cfg(not(feature = "logging"))]
    let observers: Vec<Arc<dyn Observer>> = Vec::new();

    let hub = Hub::new(Config::default(), observers);

    // Page 1 is slow today.
    let articles = hub.resource(page_loader(1, Duration::from_millis(300)));
    let mut rx = articles.subscribe();

    // The user doesn't wait: next page after 50ms.
    tokio::time::sleep(Duration::from_millis(50)).await;
    println!("switching to page 2 while page 1 is still loading");
    articles.set_loader(page_loader(2, Duration::from_millis(80)));

    let settled = rx.wait_for(|s| !s.is_pending()).await?;
    if let LoadState::Ready(items) = &*settled {
        println!("showing: {items:?}");
    }
    drop(settled);

    // Wait past page 1's arrival; the stale result must not surface.
    tokio::time::sleep(Duration::from_millis(400)).await;
    if let LoadState::Ready(items) = &*rx.borrow() {
        println!("still showing: {items:?}");
    }

    Ok(())
}
