#![forbid(unsafe_code)]

//! Explicit context objects binding modal facades to stores.
//!
//! A [`ModalContext`] is created once per modal set and handed down the
//! component tree like any other dependency. A store becomes visible through
//! it while a [`ModalProvider`] guard is alive; components call
//! [`ModalContext::use_modal`] to obtain a bound [`Modals`] facade.
//!
//! # Invariants
//!
//! 1. Providers nest; the innermost live provider wins.
//! 2. Dropping a provider removes only its own store; dropping the innermost
//!    one restores the previously provided store.
//! 3. Independent contexts never observe each other's stores.
//!
//! # Failure Modes
//!
//! - `use_modal()` with no live provider returns
//!   [`ModalError::NotInitialized`].
//! - A `Modals` handle outliving every owner of its store returns
//!   `NotInitialized` from each operation.

use std::cell::RefCell;
use std::rc::Rc;

use smodal_core::ModalError;

use crate::facade::Modals;
use crate::store::ModalStore;

/// Injection point for the store of one modal set.
#[derive(Clone, Default)]
pub struct ModalContext {
    providers: Rc<RefCell<Vec<ModalStore>>>,
}

impl std::fmt::Debug for ModalContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalContext")
            .field("providers", &self.providers.borrow().len())
            .finish()
    }
}

impl ModalContext {
    /// Create a context with no store provided.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `store` the active store until the returned guard drops.
    #[must_use = "dropping this guard unbinds the store"]
    pub fn provide(&self, store: ModalStore) -> ModalProvider {
        self.providers.borrow_mut().push(store.clone());
        tracing::trace!(modals = store.modal_set().len(), "modal provider mounted");
        ModalProvider {
            providers: Rc::clone(&self.providers),
            store,
        }
    }

    /// The active store, if any.
    #[must_use]
    pub fn store(&self) -> Option<ModalStore> {
        self.providers.borrow().last().cloned()
    }

    /// Whether a store is currently provided.
    #[must_use]
    pub fn is_provided(&self) -> bool {
        !self.providers.borrow().is_empty()
    }

    /// A facade bound to the active store.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::NotInitialized`] when no provider is alive.
    pub fn use_modal(&self) -> Result<Modals, ModalError> {
        self.store()
            .map(|store| store.modals())
            .ok_or(ModalError::NotInitialized)
    }
}

/// RAII guard keeping a store provided through a [`ModalContext`].
#[must_use = "dropping this guard unbinds the store"]
pub struct ModalProvider {
    providers: Rc<RefCell<Vec<ModalStore>>>,
    store: ModalStore,
}

impl ModalProvider {
    /// The provided store.
    #[must_use]
    pub fn store(&self) -> &ModalStore {
        &self.store
    }
}

impl std::fmt::Debug for ModalProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalProvider")
            .field("store", &self.store)
            .finish()
    }
}

impl Drop for ModalProvider {
    fn drop(&mut self) {
        let mut providers = self.providers.borrow_mut();
        if let Some(pos) = providers.iter().rposition(|s| s.ptr_eq(&self.store)) {
            providers.remove(pos);
        }
        tracing::trace!(remaining = providers.len(), "modal provider unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use smodal_core::{MergeOptions, ModalSet};

    fn store() -> ModalStore {
        ModalStore::from_set(&ModalSet::new(["modal1"]).unwrap())
    }

    #[test]
    fn use_modal_outside_provider_fails() {
        let ctx = ModalContext::new();
        assert!(!ctx.is_provided());
        assert_eq!(ctx.use_modal().unwrap_err(), ModalError::NotInitialized);
    }

    #[test]
    fn provided_store_is_reachable() {
        let ctx = ModalContext::new();
        let provider = ctx.provide(store());
        let modals = ctx.use_modal().unwrap();
        modals
            .show_modal("modal1", &json!({"title": "t"}), MergeOptions::default())
            .unwrap();
        assert!(provider.store().snapshot().is_showing("modal1"));
    }

    #[test]
    fn dropping_provider_unbinds() {
        let ctx = ModalContext::new();
        let provider = ctx.provide(store());
        let modals = ctx.use_modal().unwrap();
        drop(provider);

        assert!(!ctx.is_provided());
        assert_eq!(ctx.use_modal().unwrap_err(), ModalError::NotInitialized);
        assert_eq!(modals.is_modal_open("modal1"), Err(ModalError::NotInitialized));
    }

    #[test]
    fn nested_providers_shadow_and_restore() {
        let ctx = ModalContext::new();
        let outer = store();
        let _outer = ctx.provide(outer.clone());
        {
            let inner = store();
            let _inner = ctx.provide(inner.clone());
            assert!(ctx.store().unwrap().ptr_eq(&inner));
            ctx.use_modal()
                .unwrap()
                .show_modal("modal1", &(), MergeOptions::default())
                .unwrap();
            assert!(!outer.snapshot().is_showing("modal1"));
        }
        assert!(ctx.store().unwrap().ptr_eq(&outer));
    }

    #[test]
    fn out_of_order_drop_keeps_inner_store() {
        let ctx = ModalContext::new();
        let outer = ctx.provide(store());
        let inner = ctx.provide(store());
        drop(outer);

        assert!(ctx.store().unwrap().ptr_eq(inner.store()));
        drop(inner);
        assert!(!ctx.is_provided());
    }

    #[test]
    fn same_store_provided_twice_unwinds_one_level() {
        let ctx = ModalContext::new();
        let shared = store();
        let _first = ctx.provide(shared.clone());
        let second = ctx.provide(shared.clone());
        drop(second);
        assert!(ctx.store().unwrap().ptr_eq(&shared));
    }

    #[test]
    fn contexts_are_independent() {
        let a = ModalContext::new();
        let b = ModalContext::new();
        let _provider = a.provide(store());
        assert!(a.is_provided());
        assert!(!b.is_provided());
    }
}
