#![forbid(unsafe_code)]

//! Core modal state model for smodal.
//!
//! This crate provides:
//! - [`ModalKey`] and [`ModalSet`]: the fixed collection of modals a store manages
//! - [`ModalEntry`] and [`ModalState`]: immutable, structurally shared snapshots
//! - [`ModalAction`]: the four requested transitions and their JSON wire form
//! - [`reduce`]: the pure reducer, with the merge-data and persist-data policies
//! - [`ModalKind`]: per-modal typed payloads
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use smodal_core::{HideOptions, MergeOptions, ModalAction, ModalSet, ModalState, reduce};
//!
//! let set = ModalSet::new(["confirm", "notice"]).unwrap();
//! let state = ModalState::closed(&set);
//!
//! let state = reduce(
//!     &state,
//!     ModalAction::show("confirm", Some(json!({"title": "Delete?"})), MergeOptions::default()),
//! )
//! .unwrap();
//! assert!(state.is_showing("confirm"));
//!
//! let state = reduce(&state, ModalAction::hide("confirm", HideOptions::persist())).unwrap();
//! assert!(!state.is_showing("confirm"));
//! assert_eq!(state.data("confirm"), Some(&json!({"title": "Delete?"})));
//! ```

pub mod action;
pub mod error;
pub mod key;
pub mod kind;
pub mod payload;
pub mod reducer;
pub mod set;
pub mod state;

pub use action::{HideOptions, MergeOptions, ModalAction};
pub use error::ModalError;
pub use key::ModalKey;
pub use kind::ModalKind;
pub use payload::{Payload, from_payload, is_structured, merge_data, to_payload};
pub use reducer::{reduce, reduce_all};
pub use set::ModalSet;
pub use state::{ModalEntry, ModalState};
