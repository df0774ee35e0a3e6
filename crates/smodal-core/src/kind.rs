#![forbid(unsafe_code)]

//! Statically typed modals.
//!
//! A [`ModalKind`] ties a key of a modal set to the payload type that modal
//! carries, so a set can hold differently typed payloads while each modal's
//! data stays typed at the call site.
//!
//! # Example
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use smodal_core::ModalKind;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Confirm {
//!     message: String,
//! }
//!
//! struct ConfirmModal;
//!
//! impl ModalKind for ConfirmModal {
//!     const KEY: &'static str = "confirm";
//!     type Data = Confirm;
//! }
//!
//! assert_eq!(ConfirmModal::KEY, "confirm");
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A modal key with its payload type.
pub trait ModalKind {
    /// Key of this modal within its set.
    const KEY: &'static str;

    /// Payload carried by this modal.
    type Data: Serialize + DeserializeOwned;
}
