#![forbid(unsafe_code)]

//! Ergonomic modal operations bound to a store.
//!
//! [`Modals`] is what application code holds. Each dispatch operation builds
//! a [`ModalAction`], runs it through the store's reducer and returns once
//! the new snapshot is committed. Queries read the latest committed snapshot.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Store dropped | [`ModalError::NotInitialized`] from every operation |
//! | Key outside the set | [`ModalError::UnknownModal`] from every operation |
//! | Payload fails to serialize or deserialize | [`ModalError::Payload`] |

use std::rc::{Rc, Weak};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use smodal_core::{
    HideOptions, MergeOptions, ModalAction, ModalError, ModalKey, ModalKind, ModalState, Payload,
    from_payload, to_payload,
};

use crate::store::StoreInner;

/// Handle exposing show/hide/toggle/update and queries for one store.
///
/// Holds a weak reference: it never keeps the store alive on its own.
#[derive(Clone)]
pub struct Modals {
    store: Weak<StoreInner>,
}

impl std::fmt::Debug for Modals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modals")
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl Modals {
    pub(crate) fn bound(store: Weak<StoreInner>) -> Self {
        Self { store }
    }

    /// Whether the store behind this handle is still alive.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.store.strong_count() > 0
    }

    fn store(&self) -> Result<Rc<StoreInner>, ModalError> {
        self.store.upgrade().ok_or(ModalError::NotInitialized)
    }

    fn dispatch(
        &self,
        key: &str,
        build: impl FnOnce(ModalKey) -> Result<ModalAction, ModalError>,
    ) -> Result<(), ModalError> {
        let store = self.store()?;
        // Unknown keys go through the store so the rejection is logged there.
        let modal = store
            .modal_set()
            .resolve(key)
            .map_or_else(|_| ModalKey::new(key), ModalKey::clone);
        store.dispatch(build(modal)?)
    }

    fn read<R>(&self, key: &str, f: impl FnOnce(&ModalState) -> R) -> Result<R, ModalError> {
        let store = self.store()?;
        store.modal_set().resolve(key)?;
        Ok(store.state().with(f))
    }

    /// Open `key` with `data`.
    ///
    /// With [`MergeOptions::merge`], record data is shallow-merged into the
    /// stored record; otherwise it replaces it.
    ///
    /// # Errors
    ///
    /// `NotInitialized`, `UnknownModal` or `Payload`.
    pub fn show_modal<T: Serialize + ?Sized>(
        &self,
        key: &str,
        data: &T,
        options: MergeOptions,
    ) -> Result<(), ModalError> {
        self.dispatch(key, |modal| {
            Ok(ModalAction::Show {
                modal,
                data: to_payload(data)?,
                options,
            })
        })
    }

    /// Close `key`, keeping its data only with [`HideOptions::persist`].
    ///
    /// # Errors
    ///
    /// `NotInitialized` or `UnknownModal`.
    pub fn hide_modal(&self, key: &str, options: HideOptions) -> Result<(), ModalError> {
        self.dispatch(key, |modal| Ok(ModalAction::Hide { modal, options }))
    }

    /// Flip `key` open or closed.
    ///
    /// `data` applies only when opening; closing always clears the data.
    ///
    /// # Errors
    ///
    /// `NotInitialized`, `UnknownModal` or `Payload`.
    pub fn toggle_modal<T: Serialize + ?Sized>(
        &self,
        key: &str,
        data: &T,
        options: MergeOptions,
    ) -> Result<(), ModalError> {
        self.dispatch(key, |modal| {
            Ok(ModalAction::Toggle {
                modal,
                data: to_payload(data)?,
                options,
            })
        })
    }

    /// Replace or merge the data of `key` without changing its visibility.
    ///
    /// # Errors
    ///
    /// `NotInitialized`, `UnknownModal` or `Payload`.
    pub fn update_modal_data<T: Serialize + ?Sized>(
        &self,
        key: &str,
        data: &T,
        options: MergeOptions,
    ) -> Result<(), ModalError> {
        self.dispatch(key, |modal| {
            Ok(ModalAction::UpdateData {
                modal,
                data: to_payload(data)?.unwrap_or(Value::Null),
                options,
            })
        })
    }

    /// Whether `key` is open.
    ///
    /// # Errors
    ///
    /// `NotInitialized` or `UnknownModal`.
    pub fn is_modal_open(&self, key: &str) -> Result<bool, ModalError> {
        self.read(key, |state| state.is_showing(key))
    }

    /// The data stored for `key`.
    ///
    /// # Errors
    ///
    /// `NotInitialized` or `UnknownModal`.
    pub fn get_modal_data(&self, key: &str) -> Result<Option<Payload>, ModalError> {
        self.read(key, |state| state.data(key).cloned())
    }

    /// The data stored for `key`, deserialized as `T`.
    ///
    /// # Errors
    ///
    /// `NotInitialized`, `UnknownModal` or `Payload`.
    pub fn get_modal_data_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ModalError> {
        self.read(key, |state| from_payload(state.data(key)))?
    }

    /// The latest committed snapshot.
    ///
    /// # Errors
    ///
    /// `NotInitialized`.
    pub fn snapshot(&self) -> Result<ModalState, ModalError> {
        Ok(self.store()?.state().get())
    }

    /// Typed [`Modals::show_modal`].
    ///
    /// # Errors
    ///
    /// Same as [`Modals::show_modal`].
    pub fn show<M: ModalKind>(&self, data: &M::Data, options: MergeOptions) -> Result<(), ModalError> {
        self.show_modal(M::KEY, data, options)
    }

    /// Typed [`Modals::hide_modal`].
    ///
    /// # Errors
    ///
    /// Same as [`Modals::hide_modal`].
    pub fn hide<M: ModalKind>(&self, options: HideOptions) -> Result<(), ModalError> {
        self.hide_modal(M::KEY, options)
    }

    /// Typed [`Modals::toggle_modal`]; `data` is used only when opening.
    ///
    /// # Errors
    ///
    /// Same as [`Modals::toggle_modal`].
    pub fn toggle<M: ModalKind>(
        &self,
        data: Option<&M::Data>,
        options: MergeOptions,
    ) -> Result<(), ModalError> {
        self.toggle_modal(M::KEY, &data, options)
    }

    /// Typed [`Modals::update_modal_data`] with a partial payload.
    ///
    /// # Errors
    ///
    /// Same as [`Modals::update_modal_data`].
    pub fn update<M: ModalKind, P: Serialize + ?Sized>(
        &self,
        partial: &P,
        options: MergeOptions,
    ) -> Result<(), ModalError> {
        self.update_modal_data(M::KEY, partial, options)
    }

    /// Typed [`Modals::is_modal_open`].
    ///
    /// # Errors
    ///
    /// Same as [`Modals::is_modal_open`].
    pub fn is_open<M: ModalKind>(&self) -> Result<bool, ModalError> {
        self.is_modal_open(M::KEY)
    }

    /// Typed [`Modals::get_modal_data_as`].
    ///
    /// # Errors
    ///
    /// Same as [`Modals::get_modal_data_as`].
    pub fn data<M: ModalKind>(&self) -> Result<Option<M::Data>, ModalError> {
        self.get_modal_data_as(M::KEY)
    }
}
