//! # Function-backed loader (`LoaderFn`)
//!
//! [`LoaderFn`] wraps a closure `F: Fn() -> Fut`, producing a fresh future
//! per fetch. This avoids shared mutable state: every fetch owns its own
//! future, with nothing hidden mutating between restarts. If you need shared
//! state across fetches, capture an `Arc<...>` explicitly in the closure.
//!
//! ## Example
//! ```rust
//! use loadstate::{LoaderFn, LoaderRef};
//!
//! let page = 2u32;
//! let l: LoaderRef<Vec<String>, String> = LoaderFn::arc("articles", move || async move {
//!     // call the API client here...
//!     Ok::<_, String>(vec![format!("article from page {page}")])
//! });
//!
//! assert_eq!(l.name(), "articles");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use crate::loaders::loader::{BoxLoadFuture, Loader};

/// Function-backed loader implementation.
///
/// Wraps a closure that *creates* a new future per fetch.
#[derive(Debug)]
pub struct LoaderFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> LoaderFn<F> {
    /// Creates a new function-backed loader.
    ///
    /// Prefer [`LoaderFn::arc`] when you immediately need a [`LoaderRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the loader and returns it as a shared handle.
    ///
    /// Keep the returned `Arc` (or clones of it) around: identity is the
    /// pointer, so rebuilding an equivalent loader later counts as a *new*
    /// loader and restarts the fetch.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F, Fut, T, E> Loader<T, E> for LoaderFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: 'static,
    E: 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> BoxLoadFuture<T, E> {
        Box::pin((self.f)())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::LoaderRef;

    #[tokio::test]
    async fn test_each_fetch_creates_a_fresh_future() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let calls = Arc::new(AtomicU32::new(0));
        let counted = calls.clone();
        let l: LoaderRef<u32, String> = LoaderFn::arc("counter", move || {
            let n = counted.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok::<_, String>(n) }
        });

        assert_eq!(l.fetch().await, Ok(1));
        assert_eq!(l.fetch().await, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clones_share_identity() {
        let a: LoaderRef<u32, String> = LoaderFn::arc("same", || async { Ok::<_, String>(1) });
        let b = Arc::clone(&a);
        assert!(Arc::ptr_eq(&a, &b));

        let c: LoaderRef<u32, String> = LoaderFn::arc("same", || async { Ok::<_, String>(1) });
        // Equivalent behavior, different identity.
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
