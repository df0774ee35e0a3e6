#![forbid(unsafe_code)]

//! Version-tracked shared values with change notification.
//!
//! # Invariants
//!
//! 1. The version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current one is a no-op.
//! 4. Callbacks run after the internal borrow is released, so they may read
//!    or write the same observable.
//!
//! # Failure Modes
//!
//! - Callback panic: propagates to the caller of `set()`.
//! - A `set()` issued from inside a callback notifies recursively with the
//!   newer value and cuts the outer round short, so every subscriber ends on
//!   the latest value.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<Callback<T>>>,
    batch_depth: usize,
    pending: bool,
}

/// A shared, version-tracked value.
///
/// Clones share the same value and subscriber list.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable holding `value`, at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
                batch_depth: 0,
                pending: false,
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, notifying subscribers if it changed.
    ///
    /// Returns whether the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
            inner.version += 1;
            if inner.batch_depth > 0 {
                inner.pending = true;
                return true;
            }
        }
        self.notify();
        true
    }

    /// Compute a new value from the current one and store it.
    ///
    /// Returns whether the value changed.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = self.with(f);
        self.set(next)
    }

    /// Current version counter.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Register `callback`, called with the new value after each change.
    ///
    /// The callback stays registered until the returned [`Subscription`]
    /// is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&callback));
        Subscription {
            _callback: Box::new(callback),
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub(crate) fn begin_batch(&self) {
        self.inner.borrow_mut().batch_depth += 1;
    }

    pub(crate) fn end_batch(&self) {
        let flush = {
            let mut inner = self.inner.borrow_mut();
            inner.batch_depth = inner.batch_depth.saturating_sub(1);
            if inner.batch_depth == 0 && inner.pending {
                inner.pending = false;
                true
            } else {
                false
            }
        };
        if flush {
            self.notify();
        }
    }

    fn notify(&self) {
        let (value, version, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            let callbacks: Vec<_> = inner.subscribers.iter().filter_map(Weak::upgrade).collect();
            (inner.value.clone(), inner.version, callbacks)
        };
        for callback in callbacks {
            callback(&value);
            // A nested set() already delivered a newer value to everyone.
            if self.version() != version {
                break;
            }
        }
    }
}

/// RAII guard keeping a subscriber registered.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    _callback: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_bumps_version_once() {
        let obs = Observable::new(1);
        assert_eq!(obs.version(), 0);
        assert!(obs.set(2));
        assert_eq!(obs.version(), 1);
        assert_eq!(obs.get(), 2);
    }

    #[test]
    fn equal_set_is_noop() {
        let obs = Observable::new(5);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = obs.subscribe(move |_| h.set(h.get() + 1));

        assert!(!obs.set(5));
        assert_eq!(obs.version(), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn subscribers_run_in_order() {
        let obs = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let subs: Vec<_> = (0..3)
            .map(|i| {
                let log = Rc::clone(&log);
                obs.subscribe(move |v| log.borrow_mut().push((i, *v)))
            })
            .collect();

        obs.set(7);
        assert_eq!(*log.borrow(), vec![(0, 7), (1, 7), (2, 7)]);
        drop(subs);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let sub = obs.subscribe(move |v| s.set(*v));
        assert_eq!(obs.subscriber_count(), 1);

        obs.set(1);
        drop(sub);
        obs.set(2);
        assert_eq!(seen.get(), 1);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn callback_may_read_observable() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));
        let (o, s) = (obs.clone(), Rc::clone(&seen));
        let _sub = obs.subscribe(move |_| s.set(o.get()));

        obs.set(3);
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn nested_set_delivers_latest_value_last() {
        let obs = Observable::new(0);
        let writer = obs.clone();
        let _first = obs.subscribe(move |v| {
            if *v == 1 {
                writer.set(2);
            }
        });
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _second = obs.subscribe(move |v| s.borrow_mut().push(*v));

        obs.set(1);
        assert_eq!(*seen.borrow(), vec![2]);
        assert_eq!(obs.get(), 2);
    }

    #[test]
    fn update_uses_current_value() {
        let obs = Observable::new(2);
        assert!(obs.update(|v| v * 10));
        assert_eq!(obs.get(), 20);
    }

    #[test]
    fn batch_defers_notification() {
        let obs = Observable::new(0);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = obs.subscribe(move |_| h.set(h.get() + 1));

        obs.begin_batch();
        obs.set(1);
        obs.set(2);
        assert_eq!(obs.get(), 2);
        assert_eq!(hits.get(), 0);
        obs.end_batch();
        assert_eq!(hits.get(), 1);
        assert_eq!(obs.version(), 2);
    }
}
