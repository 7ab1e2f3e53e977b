//! Error types used by cancelable fetches.
//!
//! This module defines [`FetchError`], the outcome error of a
//! [`CancelableFetch`](crate::CancelableFetch):
//!
//! - [`FetchError::Canceled`] — produced only by this crate, when the fetch
//!   was marked stale before its outcome was observed.
//! - [`FetchError::Failed`] — the loader's own error, carried verbatim.
//!
//! `Canceled` is structurally distinct from anything a loader can return, so
//! a consumer can always tell "the operation failed" apart from "we stopped
//! caring about the result". Cancellation is an internal staleness signal:
//! a [`Resource`](crate::Resource) never surfaces it as a published state.

use thiserror::Error;

/// Outcome error of a cancelable fetch.
///
/// `E` is the loader's error type. `Failed(E)` preserves the loader's error
/// exactly — no wrapping, no reinterpretation, no retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError<E> {
    /// The fetch was canceled before its outcome was observed.
    ///
    /// The underlying operation is *not* aborted; only its result is
    /// suppressed. See [`CancelHandle::cancel`](crate::CancelHandle::cancel).
    #[error("fetch canceled before completion")]
    Canceled,

    /// The loader itself failed.
    #[error("fetch failed: {0}")]
    Failed(E),
}

impl<E> FetchError<E> {
    /// Returns `true` for [`FetchError::Canceled`].
    ///
    /// # Example
    /// ```
    /// use loadstate::FetchError;
    ///
    /// let canceled: FetchError<String> = FetchError::Canceled;
    /// assert!(canceled.is_canceled());
    ///
    /// let failed: FetchError<String> = FetchError::Failed("boom".into());
    /// assert!(!failed.is_canceled());
    /// ```
    pub fn is_canceled(&self) -> bool {
        matches!(self, FetchError::Canceled)
    }

    /// Returns the loader error, consuming `self`, or `None` if canceled.
    pub fn into_failure(self) -> Option<E> {
        match self {
            FetchError::Canceled => None,
            FetchError::Failed(e) => Some(e),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use loadstate::FetchError;
    ///
    /// let err: FetchError<String> = FetchError::Canceled;
    /// assert_eq!(err.as_label(), "fetch_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            FetchError::Canceled => "fetch_canceled",
            FetchError::Failed(_) => "fetch_failed",
        }
    }
}
