#![forbid(unsafe_code)]

//! Deferred notification scopes.
//!
//! While a [`BatchScope`] is alive, writes to its observable apply
//! immediately but subscribers are not called. When the outermost scope
//! drops, subscribers are notified once with the final value, and only if
//! a write changed it.

use super::observable::Observable;

/// RAII guard deferring notifications of one observable.
#[must_use = "dropping the scope flushes notifications immediately"]
pub struct BatchScope {
    end: Option<Box<dyn FnOnce()>>,
}

impl BatchScope {
    /// Open a batch on `source`. Scopes nest.
    pub fn new<T: Clone + PartialEq + 'static>(source: &Observable<T>) -> Self {
        source.begin_batch();
        let source = source.clone();
        Self {
            end: Some(Box::new(move || source.end_batch())),
        }
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        if let Some(end) = self.end.take() {
            end();
        }
    }
}

impl std::fmt::Debug for BatchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScope").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counted(obs: &Observable<i32>) -> (Rc<Cell<u32>>, crate::reactive::Subscription) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = obs.subscribe(move |_| h.set(h.get() + 1));
        (hits, sub)
    }

    #[test]
    fn nested_scopes_flush_once() {
        let obs = Observable::new(0);
        let (hits, _sub) = counted(&obs);
        {
            let _outer = BatchScope::new(&obs);
            obs.set(1);
            {
                let _inner = BatchScope::new(&obs);
                obs.set(2);
            }
            assert_eq!(hits.get(), 0);
        }
        assert_eq!(hits.get(), 1);
        assert_eq!(obs.get(), 2);
    }

    #[test]
    fn unchanged_batch_does_not_notify() {
        let obs = Observable::new(0);
        let (hits, _sub) = counted(&obs);
        {
            let _scope = BatchScope::new(&obs);
            obs.set(0);
        }
        assert_eq!(hits.get(), 0);
    }
}
