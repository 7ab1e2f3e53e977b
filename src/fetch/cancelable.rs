//! # Result-filtering wrapper around an in-flight operation.
//!
//! [`CancelableFetch`] spawns an operation onto the runtime and pairs it with
//! a [`CancellationToken`]. Canceling through the [`CancelHandle`] does **not**
//! abort the operation — it keeps running detached, and may well complete its
//! work on the wire — it only replaces the *reported* outcome with
//! [`FetchError::Canceled`].
//!
//! ## Rules
//! - A cancel that lands before the outcome is observed wins, regardless of
//!   which way the underlying operation settles.
//! - `cancel()` is idempotent; calls after the outcome has been observed have
//!   no effect on anything.
//! - Callers must not rely on cancellation for resource reclamation, only for
//!   consistency of what they observe.

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::FetchError;

/// Control used to mark a fetch stale.
///
/// Cheap to clone; all clones refer to the same flag. Detached from the fetch
/// itself so an owner can keep the handle while the fetch is driven elsewhere.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Marks the fetch stale.
    ///
    /// The underlying operation is not aborted; only its reported outcome is
    /// replaced with [`FetchError::Canceled`]. Safe to call multiple times or
    /// after settlement; all calls after the first are no-ops.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once [`cancel`](CancelHandle::cancel) has been invoked.
    pub fn is_canceled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// An in-flight operation whose outcome can be suppressed.
///
/// Created with [`CancelableFetch::spawn`]; consumed by
/// [`outcome`](CancelableFetch::outcome).
#[derive(Debug)]
pub struct CancelableFetch<T, E> {
    handle: JoinHandle<Result<T, E>>,
    token: CancellationToken,
}

impl<T, E> CancelableFetch<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Spawns `operation` onto the current runtime and wraps it.
    ///
    /// The operation starts immediately. Must be called within a Tokio
    /// runtime.
    pub fn spawn<Fut>(operation: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(operation),
            token: CancellationToken::new(),
        }
    }

    /// Returns the cancellation control for this fetch.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            token: self.token.clone(),
        }
    }

    /// Returns `true` once the fetch has been marked stale.
    pub fn is_canceled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits for the outcome, consuming the fetch.
    ///
    /// Resolves to:
    /// - `Ok(value)` if the operation succeeds before cancellation;
    /// - `Err(FetchError::Failed(e))` if it fails before cancellation, with
    ///   `e` exactly as the operation produced it;
    /// - `Err(FetchError::Canceled)` if [`CancelHandle::cancel`] was invoked
    ///   first — even when the operation has already settled by the time the
    ///   outcome is observed.
    ///
    /// In the canceled case the spawned operation is left running detached.
    ///
    /// # Panics
    /// Propagates a panic from the spawned operation to the awaiter.
    pub async fn outcome(self) -> Result<T, FetchError<E>> {
        let Self { handle, token } = self;

        tokio::select! {
            // Biased so a cancel that races a settlement always wins.
            biased;
            _ = token.cancelled() => Err(FetchError::Canceled),
            joined = handle => match joined {
                // Settled, but the flag may have been raised in between.
                Ok(_) if token.is_cancelled() => Err(FetchError::Canceled),
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(FetchError::Failed(e)),
                Err(join_err) => {
                    if join_err.is_panic() {
                        std::panic::resume_unwind(join_err.into_panic());
                    }
                    // Runtime tore the task down (shutdown/abort): stale.
                    Err(FetchError::Canceled)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_success_passes_through() {
        let fetch = CancelableFetch::<_, String>::spawn(async {
            sleep(Duration::from_millis(10)).await;
            Ok("data".to_string())
        });
        assert_eq!(fetch.outcome().await, Ok("data".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_passes_through_verbatim() {
        #[derive(Debug, PartialEq)]
        struct ApiError(u16);

        let fetch = CancelableFetch::<String, _>::spawn(async {
            sleep(Duration::from_millis(10)).await;
            Err(ApiError(503))
        });
        assert_eq!(fetch.outcome().await, Err(FetchError::Failed(ApiError(503))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_success() {
        let fetch = CancelableFetch::<_, String>::spawn(async {
            sleep(Duration::from_millis(20)).await;
            Ok(42u32)
        });
        let handle = fetch.cancel_handle();

        sleep(Duration::from_millis(5)).await;
        handle.cancel();
        assert_eq!(fetch.outcome().await, Err(FetchError::Canceled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_failure() {
        let fetch = CancelableFetch::<u32, _>::spawn(async {
            sleep(Duration::from_millis(10)).await;
            Err("network down".to_string())
        });
        let handle = fetch.cancel_handle();

        sleep(Duration::from_millis(5)).await;
        handle.cancel();
        // The rejection never surfaces as a Failure.
        assert_eq!(fetch.outcome().await, Err(FetchError::Canceled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_settlement_but_before_observation() {
        let fetch = CancelableFetch::<_, String>::spawn(async { Ok(1u32) });
        let handle = fetch.cancel_handle();

        // Let the spawned operation settle before anyone looks at it.
        tokio::task::yield_now().await;
        handle.cancel();
        assert_eq!(fetch.outcome().await, Err(FetchError::Canceled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let fetch = CancelableFetch::<_, String>::spawn(async {
            sleep(Duration::from_millis(10)).await;
            Ok(())
        });
        let handle = fetch.cancel_handle();
        handle.cancel();
        handle.cancel();
        assert!(handle.is_canceled());
        assert_eq!(fetch.outcome().await, Err(FetchError::Canceled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_is_advisory() {
        // The operation keeps running after cancel; only the outcome is
        // suppressed.
        let completed = Arc::new(AtomicBool::new(false));
        let flag = completed.clone();

        let fetch = CancelableFetch::<_, String>::spawn(async move {
            sleep(Duration::from_millis(10)).await;
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });
        let handle = fetch.cancel_handle();
        handle.cancel();

        assert_eq!(fetch.outcome().await, Err(FetchError::Canceled));
        assert!(!completed.load(Ordering::SeqCst));

        sleep(Duration::from_millis(20)).await;
        assert!(completed.load(Ordering::SeqCst));
    }
}
