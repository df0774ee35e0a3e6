#![forbid(unsafe_code)]

//! Change propagation for modal stores.
//!
//! - [`Observable`]: a shared, version-tracked value with subscriber callbacks.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`BatchScope`]: RAII guard deferring notifications until the outermost
//!   scope exits.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are held as `Weak` callbacks and pruned lazily
//! during notification. Batching is tracked per observable, so independent
//! stores never delay each other.

pub mod batch;
pub mod observable;

pub use batch::BatchScope;
pub use observable::{Observable, Subscription};
