//! # Observable load state of a resource.
//!
//! [`LoadState`] is the tagged union published by a
//! [`Resource`](crate::Resource) on every transition. It is the *only*
//! externally observable state of a resource at any instant:
//!
//! - [`LoadState::Pending`] — a fetch is in flight (or none has settled yet);
//! - [`LoadState::Ready`] — the most recent fetch succeeded;
//! - [`LoadState::Failed`] — the most recent fetch failed; the loader's error
//!   is carried verbatim.
//!
//! A resource always starts in `Pending` and re-enters `Pending` whenever its
//! loader is replaced, so consumers can render a skeleton/spinner without
//! special-casing the first load.

/// Current state of an asynchronously loaded value.
///
/// `T` is the loaded data, `E` the loader's error type. The error is stored
/// exactly as the loader produced it — no wrapping, no classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState<T, E> {
    /// No settled result yet; a fetch may be in flight.
    Pending,
    /// The most recent fetch completed successfully.
    Ready(T),
    /// The most recent fetch failed with the loader's own error.
    Failed(E),
}

impl<T, E> LoadState<T, E> {
    /// Returns `true` while no fetch outcome has been published.
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    /// Returns `true` if the state holds loaded data.
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    /// Returns `true` if the state holds a loader error.
    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    /// Returns the loaded data, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the loader error, if any.
    pub fn failed(&self) -> Option<&E> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Borrows the state without cloning the payload.
    pub fn as_ref(&self) -> LoadState<&T, &E> {
        match self {
            LoadState::Pending => LoadState::Pending,
            LoadState::Ready(v) => LoadState::Ready(v),
            LoadState::Failed(e) => LoadState::Failed(e),
        }
    }

    /// Maps the data, leaving `Pending`/`Failed` untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U, E> {
        match self {
            LoadState::Pending => LoadState::Pending,
            LoadState::Ready(v) => LoadState::Ready(f(v)),
            LoadState::Failed(e) => LoadState::Failed(e),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            LoadState::Pending => "pending",
            LoadState::Ready(_) => "ready",
            LoadState::Failed(_) => "failed",
        }
    }
}

impl<T, E> Default for LoadState<T, E> {
    /// A resource starts out `Pending`.
    fn default() -> Self {
        LoadState::Pending
    }
}
