//! # Demo: basic
//!
//! Loads one "article" through a [`Resource`] and watches its state move
//! from `Pending` to `Ready`, then forces a refresh with `reload()`.
//!
//! ## Run
//! ```bash
//! cargo run --example basic --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use loadstate::{Config, Hub, InflightTracker, LoadState, LoaderFn, LoaderRef, Observer, Resource};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== basic example ===\n");

    // 1. Build observers: inflight tracking plus (optionally) stdout logging.
    let inflight = Arc::new(InflightTracker::new());
    #[allow(unused_mut)]
    let mut observers: Vec<Arc<dyn Observer>> = vec![inflight.clone()];
    #[cfg(feature = "logging")]
    observers.push(Arc::new(loadstate::LogWriter::new()));

    // 2. Create the hub all resources report to.
    let hub = Hub::new(Config::default(), observers);

    // 3. Define a loader: zero-argument, parameters captured inside.
    let slug = "how-to-train-your-borrow-checker".to_string();
    let loader: LoaderRef<String, String> = LoaderFn::arc("article", move || {
        let slug = slug.clone();
        async move {
            // Stand-in for the API client call.
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, String>(format!("article body for {slug}"))
        }
    });

    // 4. Create the resource and observe it.
    let article: Resource<String, String> = hub.resource(loader);
    let mut rx = article.subscribe();
    println!("state: {}", rx.borrow().as_label());
    println!("loading now: {:?}", inflight.snapshot().await);

    let settled = rx.wait_for(|s| !s.is_pending()).await?;
    match &*settled {
        LoadState::Ready(body) => println!("loaded: {body}"),
        LoadState::Failed(err) => println!("failed: {err}"),
        LoadState::Pending => unreachable!(),
    }
    drop(settled);

    // 5. Refresh on demand: same loader, new fetch, Pending in between.
    article.reload();
    println!("state after reload: {}", rx.borrow().as_label());
    let refreshed = rx.wait_for(|s| !s.is_pending()).await?;
    println!("refreshed: {}", refreshed.as_label());
    drop(refreshed);

    // Give the observer workers a beat to drain their queues.
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(())
}
