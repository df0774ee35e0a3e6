#![forbid(unsafe_code)]

//! Modal sets and initial state loaded from TOML or JSON.
//!
//! ```toml
//! [modals.modal1]
//!
//! [modals.modal2]
//! is_showing = false
//! data = { message = "preloaded" }
//! ```
//!
//! Every table under `modals` declares one modal. Omitted fields default to
//! a closed modal with no data.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use smodal_core::{ModalEntry, ModalError, ModalSet, ModalState};

use crate::store::ModalStore;

/// Declarative description of a modal set and its initial entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModalConfig {
    /// Initial entry per modal key.
    pub modals: BTreeMap<String, ModalEntry>,
}

impl ModalConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::Config`] on invalid TOML or an unexpected shape.
    pub fn from_toml_str(input: &str) -> Result<Self, ModalError> {
        toml::from_str(input).map_err(|e| ModalError::Config(e.to_string()))
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::Config`] on invalid JSON or an unexpected shape.
    pub fn from_json_str(input: &str) -> Result<Self, ModalError> {
        serde_json::from_str(input).map_err(|e| ModalError::Config(e.to_string()))
    }

    /// Load a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::Config`] if the file cannot be read, has another
    /// extension, or does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModalError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ModalError::Config(format!("{}: {e}", path.display())))?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(ModalError::Config(format!(
                "{}: expected a .toml or .json file",
                path.display()
            ))),
        }?;
        tracing::debug!(path = %path.display(), modals = config.modals.len(), "loaded modal config");
        Ok(config)
    }

    /// The modal set declared by this config.
    #[must_use]
    pub fn modal_set(&self) -> ModalSet {
        // Map keys are unique already.
        ModalSet::new(self.modals.keys().map(String::as_str)).unwrap_or_default()
    }

    /// The initial snapshot declared by this config.
    #[must_use]
    pub fn into_state(self) -> ModalState {
        let set = self.modal_set();
        ModalState::from_entries(&set, self.modals).unwrap_or_else(|_| ModalState::closed(&set))
    }

    /// A store starting from the declared snapshot.
    #[must_use]
    pub fn into_store(self) -> ModalStore {
        ModalStore::new(self.into_state())
    }
}
