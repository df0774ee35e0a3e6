#![forbid(unsafe_code)]

//! Requested modal transitions and their wire form.
//!
//! Actions serialize as tagged JSON objects:
//!
//! ```json
//! {"type": "SHOW_MODAL", "modalType": "modal1", "data": {"title": "Hi"}, "options": {"mergeData": true}}
//! ```
//!
//! The tag set is closed. [`ModalAction::from_json`] separates an unknown tag
//! ([`ModalError::UnknownAction`]) from a known tag with bad fields
//! ([`ModalError::MalformedAction`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ModalError;
use crate::key::ModalKey;
use crate::payload::Payload;

/// Options for transitions that accept new data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MergeOptions {
    /// Shallow-merge the new data into the stored data when both are records.
    pub merge_data: bool,
}

impl MergeOptions {
    /// Options with merging enabled.
    #[must_use]
    pub const fn merge() -> Self {
        Self { merge_data: true }
    }
}

/// Options for hiding a modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HideOptions {
    /// Keep the stored data after hiding.
    pub persist_data: bool,
}

impl HideOptions {
    /// Options with data persistence enabled.
    #[must_use]
    pub const fn persist() -> Self {
        Self { persist_data: true }
    }
}

/// One requested transition of a single modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModalAction {
    /// Open the modal with `data`.
    #[serde(rename = "SHOW_MODAL")]
    Show {
        #[serde(rename = "modalType")]
        modal: ModalKey,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Payload>,
        #[serde(default)]
        options: MergeOptions,
    },
    /// Close the modal.
    #[serde(rename = "HIDE_MODAL")]
    Hide {
        #[serde(rename = "modalType")]
        modal: ModalKey,
        #[serde(default)]
        options: HideOptions,
    },
    /// Flip the modal's visibility; `data` applies only when opening.
    #[serde(rename = "TOGGLE_MODAL")]
    Toggle {
        #[serde(rename = "modalType")]
        modal: ModalKey,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Payload>,
        #[serde(default)]
        options: MergeOptions,
    },
    /// Replace or merge the modal's data without touching visibility.
    #[serde(rename = "UPDATE_MODAL_DATA")]
    UpdateData {
        #[serde(rename = "modalType")]
        modal: ModalKey,
        data: Payload,
        #[serde(default)]
        options: MergeOptions,
    },
}

impl ModalAction {
    /// Wire tags of every variant.
    pub const TAGS: [&'static str; 4] = [
        "SHOW_MODAL",
        "HIDE_MODAL",
        "TOGGLE_MODAL",
        "UPDATE_MODAL_DATA",
    ];

    /// Build a show action.
    pub fn show(modal: impl Into<ModalKey>, data: Option<Payload>, options: MergeOptions) -> Self {
        Self::Show {
            modal: modal.into(),
            data,
            options,
        }
    }

    /// Build a hide action.
    pub fn hide(modal: impl Into<ModalKey>, options: HideOptions) -> Self {
        Self::Hide {
            modal: modal.into(),
            options,
        }
    }

    /// Build a toggle action.
    pub fn toggle(modal: impl Into<ModalKey>, data: Option<Payload>, options: MergeOptions) -> Self {
        Self::Toggle {
            modal: modal.into(),
            data,
            options,
        }
    }

    /// Build an update-data action.
    pub fn update_data(modal: impl Into<ModalKey>, data: Payload, options: MergeOptions) -> Self {
        Self::UpdateData {
            modal: modal.into(),
            data,
            options,
        }
    }

    /// The targeted modal.
    #[must_use]
    pub fn modal(&self) -> &ModalKey {
        match self {
            Self::Show { modal, .. }
            | Self::Hide { modal, .. }
            | Self::Toggle { modal, .. }
            | Self::UpdateData { modal, .. } => modal,
        }
    }

    /// The wire tag of this action.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Show { .. } => "SHOW_MODAL",
            Self::Hide { .. } => "HIDE_MODAL",
            Self::Toggle { .. } => "TOGGLE_MODAL",
            Self::UpdateData { .. } => "UPDATE_MODAL_DATA",
        }
    }

    /// Decode an action from its JSON wire form.
    ///
    /// # Errors
    ///
    /// - [`ModalError::MalformedAction`] for invalid JSON, a missing or
    ///   non-string `type`, or invalid fields under a known tag.
    /// - [`ModalError::UnknownAction`] for a tag no variant recognizes.
    pub fn from_json(input: &str) -> Result<Self, ModalError> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| ModalError::MalformedAction(e.to_string()))?;
        Self::from_value(value)
    }

    /// Decode an action from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`ModalAction::from_json`].
    pub fn from_value(value: Value) -> Result<Self, ModalError> {
        let tag = match value.get("type") {
            Some(Value::String(tag)) => tag,
            Some(_) => {
                return Err(ModalError::MalformedAction(
                    "`type` must be a string".into(),
                ));
            }
            None => return Err(ModalError::MalformedAction("missing `type`".into())),
        };
        if !Self::TAGS.contains(&tag.as_str()) {
            return Err(ModalError::UnknownAction(tag.clone()));
        }
        serde_json::from_value(value).map_err(|e| ModalError::MalformedAction(e.to_string()))
    }

    /// Encode this action in its JSON wire form.
    #[must_use]
    pub fn to_json(&self) -> String {
        // Keys are strings and payloads are already JSON values.
        serde_json::to_string(self).unwrap_or_default()
    }
}
