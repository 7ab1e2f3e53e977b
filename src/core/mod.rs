//! Runtime core: the resource state machine and its wiring.
//!
//! Internal modules:
//! - [`resource`]: owns one cancelable fetch at a time, restarts on loader
//!   identity change, publishes `LoadState` through a watch channel;
//! - [`driver`]: awaits one fetch's outcome and publishes it — or discards it
//!   as stale — under the resource lock;
//! - [`hub`]: wires an event bus to an observer set.

mod driver;
mod hub;
mod resource;

pub(crate) use driver::panic_message;
pub use hub::Hub;
pub use resource::Resource;
