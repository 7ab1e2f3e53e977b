//! # Loader abstractions.
//!
//! This module provides the loader-related types:
//! - [`Loader`] - trait for named, zero-argument data sources
//! - [`LoaderFn`] - function-backed loader implementation
//! - [`LoaderRef`] - shared handle to a loader (`Arc<dyn Loader>`)
//! - [`BoxLoadFuture`] - the boxed future a loader produces
//!
//! A loader captures whatever parameters it needs (page number, filter, auth
//! token) in its own state; the rest of the crate treats it as opaque and
//! distinguishes two loaders **only by `Arc` identity**, never by comparing
//! captured parameters.

mod loader;
mod loader_fn;

pub use loader::{BoxLoadFuture, Loader, LoaderRef};
pub use loader_fn::LoaderFn;
