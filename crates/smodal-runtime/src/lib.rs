#![forbid(unsafe_code)]

//! Runtime for smodal: live stores, facades and context binding.
//!
//! This crate provides:
//! - [`ModalStore`]: the live snapshot of one modal set, dispatching through
//!   [`smodal_core::reduce`] and notifying subscribers
//! - [`Modals`]: the facade application code calls (show, hide, toggle,
//!   update, queries)
//! - [`ModalContext`] / [`ModalProvider`]: explicit injection of a store into
//!   a component tree
//! - [`reactive`]: the observable primitives stores are built on
//! - `config` (feature `config`): modal sets and initial state from files
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use smodal_runtime::{MergeOptions, ModalContext, ModalSet, ModalStore};
//!
//! let ctx = ModalContext::new();
//! assert!(ctx.use_modal().is_err());
//!
//! let _provider = ctx.provide(ModalStore::from_set(&ModalSet::new(["notice"]).unwrap()));
//! let modals = ctx.use_modal().unwrap();
//! modals.show_modal("notice", &json!({"message": "Saved"}), MergeOptions::default()).unwrap();
//! assert!(modals.is_modal_open("notice").unwrap());
//! ```

#[cfg(feature = "config")]
pub mod config;
pub mod context;
pub mod facade;
pub mod reactive;
pub mod store;

#[cfg(feature = "config")]
pub use config::ModalConfig;
pub use context::{ModalContext, ModalProvider};
pub use facade::Modals;
pub use reactive::{BatchScope, Observable, Subscription};
pub use store::ModalStore;

pub use smodal_core::{
    HideOptions, MergeOptions, ModalAction, ModalEntry, ModalError, ModalKey, ModalKind, ModalSet,
    ModalState, Payload,
};
