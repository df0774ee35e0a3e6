#![forbid(unsafe_code)]

//! smodal public facade.
//!
//! Manage the open/closed state and data of a fixed set of named modals
//! through one store per set.
//!
//! - [`model`]: keys, sets, snapshots, actions and the pure reducer
//! - [`runtime`]: stores, the [`Modals`] facade and context binding
//!
//! ```
//! use smodal::prelude::*;
//!
//! let ctx = ModalContext::new();
//! let _provider = ctx.provide(ModalStore::from_set(&ModalSet::new(["modal1"]).unwrap()));
//!
//! let modals = ctx.use_modal().unwrap();
//! modals.toggle_modal("modal1", &(), MergeOptions::default()).unwrap();
//! assert!(modals.is_modal_open("modal1").unwrap());
//! ```

pub use smodal_core as model;
pub use smodal_runtime as runtime;

pub use smodal_core::{
    HideOptions, MergeOptions, ModalAction, ModalEntry, ModalError, ModalKey, ModalKind, ModalSet,
    ModalState, Payload, reduce,
};
#[cfg(feature = "config")]
pub use smodal_runtime::ModalConfig;
pub use smodal_runtime::{ModalContext, ModalProvider, ModalStore, Modals, Subscription};

/// Everything needed to declare and drive a modal set.
pub mod prelude {
    #[cfg(feature = "config")]
    pub use crate::ModalConfig;
    pub use crate::{
        HideOptions, MergeOptions, ModalContext, ModalError, ModalKind, ModalSet, ModalStore,
        Modals,
    };
}
