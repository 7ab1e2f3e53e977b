//! # Loader trait and shared handle type.
//!
//! A [`Loader`] is a named, zero-argument source of data: each call to
//! [`fetch`](Loader::fetch) produces a **fresh** future resolving to
//! `Result<T, E>`. The common handle type is [`LoaderRef`], an
//! `Arc<dyn Loader>` suitable for sharing between screens and resources.
//!
//! ## Identity
//! A [`Resource`](crate::Resource) compares loaders by `Arc` pointer identity
//! (`Arc::ptr_eq`), not by value. Clones of one `LoaderRef` are the *same*
//! loader; two separately built loaders are different even if behaviorally
//! identical. See [`Resource::set_loader`](crate::Resource::set_loader).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future produced by a loader.
pub type BoxLoadFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

/// # Shared handle to a loader object.
///
/// This is the primary type accepted by [`Resource`](crate::Resource).
pub type LoaderRef<T, E> = Arc<dyn Loader<T, E>>;

/// # Named, zero-argument asynchronous data source.
///
/// A `Loader` has a stable [`name`](Loader::name) (used in diagnostic events)
/// and a [`fetch`](Loader::fetch) method producing a fresh future per call.
/// Parameters belong inside the implementor; callers never pass arguments.
///
/// # Example
/// ```
/// use loadstate::{BoxLoadFuture, Loader};
///
/// struct ArticlePage {
///     page: u32,
/// }
///
/// impl Loader<Vec<String>, String> for ArticlePage {
///     fn name(&self) -> &str { "articles" }
///
///     fn fetch(&self) -> BoxLoadFuture<Vec<String>, String> {
///         let page = self.page;
///         Box::pin(async move {
///             // call the API client here...
///             Ok(vec![format!("article from page {page}")])
///         })
///     }
/// }
/// ```
pub trait Loader<T, E>: Send + Sync + 'static {
    /// Returns a stable, human-readable loader name.
    fn name(&self) -> &str;

    /// Starts one fetch, returning a fresh future owning its own state.
    fn fetch(&self) -> BoxLoadFuture<T, E>;
}
