#![forbid(unsafe_code)]

//! The modal store: one live snapshot per modal set.
//!
//! A [`ModalStore`] holds the current [`ModalState`] in an [`Observable`]
//! and routes every dispatched action through [`reduce`]. Subscribers see
//! each committed snapshot; dispatches that leave the state unchanged do not
//! notify.
//!
//! # Invariants
//!
//! 1. Transitions apply in dispatch order, including inside a batch.
//! 2. A rejected dispatch leaves the state and version untouched.
//! 3. The modal set never changes for the lifetime of the store.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use smodal_runtime::{HideOptions, MergeOptions, ModalSet, ModalStore};
//!
//! let store = ModalStore::from_set(&ModalSet::new(["confirm"]).unwrap());
//! let modals = store.modals();
//!
//! modals.show_modal("confirm", &json!({"title": "Sure?"}), MergeOptions::default()).unwrap();
//! assert!(modals.is_modal_open("confirm").unwrap());
//!
//! modals.hide_modal("confirm", HideOptions::default()).unwrap();
//! assert_eq!(modals.get_modal_data("confirm").unwrap(), None);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use smodal_core::{ModalAction, ModalEntry, ModalError, ModalSet, ModalState, reduce};

use crate::facade::Modals;
use crate::reactive::{BatchScope, Observable, Subscription};

pub(crate) struct StoreInner {
    set: ModalSet,
    state: Observable<ModalState>,
}

impl StoreInner {
    pub(crate) fn modal_set(&self) -> &ModalSet {
        &self.set
    }

    pub(crate) fn state(&self) -> &Observable<ModalState> {
        &self.state
    }

    pub(crate) fn dispatch(&self, action: ModalAction) -> Result<(), ModalError> {
        let name = action.name();
        let modal = action.modal().clone();
        match self.state.with(|state| reduce(state, action)) {
            Ok(next) => {
                let changed = self.state.set(next);
                tracing::debug!(action = name, modal = %modal, changed, "modal dispatch");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(action = name, modal = %modal, error = %err, "modal dispatch rejected");
                Err(err)
            }
        }
    }
}

/// Live state of one modal set.
///
/// Clones share the same state and subscribers.
#[derive(Clone)]
pub struct ModalStore {
    inner: Rc<StoreInner>,
}

impl std::fmt::Debug for ModalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalStore")
            .field("modals", &self.inner.set.len())
            .field("version", &self.version())
            .finish()
    }
}

impl ModalStore {
    /// Create a store starting from `initial`.
    #[must_use]
    pub fn new(initial: ModalState) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                set: initial.modal_set(),
                state: Observable::new(initial),
            }),
        }
    }

    /// Create a store with every modal of `set` closed.
    #[must_use]
    pub fn from_set(set: &ModalSet) -> Self {
        Self::new(ModalState::closed(set))
    }

    /// Create a store from explicit initial entries.
    ///
    /// # Errors
    ///
    /// Fails when `entries` do not cover `set` exactly; see
    /// [`ModalState::from_entries`].
    pub fn from_entries<I, K>(set: &ModalSet, entries: I) -> Result<Self, ModalError>
    where
        I: IntoIterator<Item = (K, ModalEntry)>,
        K: AsRef<str>,
    {
        ModalState::from_entries(set, entries).map(Self::new)
    }

    /// The modal set this store manages.
    #[must_use]
    pub fn modal_set(&self) -> &ModalSet {
        &self.inner.set
    }

    /// Apply `action` through the reducer and commit the result.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::UnknownModal`] for keys outside the set.
    pub fn dispatch(&self, action: ModalAction) -> Result<(), ModalError> {
        self.inner.dispatch(action)
    }

    /// Decode a JSON action and dispatch it.
    ///
    /// # Errors
    ///
    /// Decoding errors from [`ModalAction::from_json`], then the errors of
    /// [`ModalStore::dispatch`].
    pub fn dispatch_json(&self, input: &str) -> Result<(), ModalError> {
        let action = ModalAction::from_json(input).inspect_err(|err| {
            tracing::warn!(error = %err, "undecodable modal action");
        })?;
        self.dispatch(action)
    }

    /// The latest committed snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ModalState {
        self.inner.state.get()
    }

    /// Number of committed changes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.state.version()
    }

    /// Call `callback` with each newly committed snapshot.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&ModalState) + 'static) -> Subscription {
        self.inner.state.subscribe(callback)
    }

    /// Call `callback` only when the entry of `key` changes.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::UnknownModal`] for keys outside the set.
    pub fn watch(
        &self,
        key: &str,
        callback: impl Fn(&ModalEntry) + 'static,
    ) -> Result<Subscription, ModalError> {
        let key = self.inner.set.resolve(key)?.clone();
        let last = self
            .inner
            .state
            .with(|state| state.entry(key.as_str()).cloned())?;
        let last = RefCell::new(last);
        Ok(self.inner.state.subscribe(move |state| {
            let Ok(entry) = state.entry(key.as_str()) else {
                return;
            };
            let changed = {
                let mut last = last.borrow_mut();
                if Arc::ptr_eq(&last, entry) || **last == **entry {
                    false
                } else {
                    *last = Arc::clone(entry);
                    true
                }
            };
            if changed {
                callback(entry);
            }
        }))
    }

    /// Defer notifications until the returned scope drops.
    ///
    /// Dispatches inside the scope still apply immediately and in order;
    /// subscribers see only the final snapshot.
    pub fn batch(&self) -> BatchScope {
        BatchScope::new(&self.inner.state)
    }

    /// A facade bound to this store.
    #[must_use]
    pub fn modals(&self) -> Modals {
        Modals::bound(self.downgrade())
    }

    /// Whether two handles refer to the same store.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> Weak<StoreInner> {
        Rc::downgrade(&self.inner)
    }
}
