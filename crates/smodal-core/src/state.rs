#![forbid(unsafe_code)]

//! Modal entries and whole-set snapshots.
//!
//! # Invariants
//!
//! 1. A [`ModalState`] holds exactly one entry per key of the modal set it
//!    was built for, and no others.
//! 2. Snapshots are immutable. A transition builds a new snapshot that
//!    shares every untouched entry by pointer with its predecessor.
//!
//! # Failure Modes
//!
//! - Lookup of a key outside the set returns [`ModalError::UnknownModal`].
//! - [`ModalState::from_entries`] rejects missing, extra and repeated keys.

use std::sync::Arc;

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::error::ModalError;
use crate::key::ModalKey;
use crate::payload::{Payload, normalize};
use crate::set::ModalSet;

/// Visibility flag and data of one modal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModalEntry {
    /// Whether the modal is currently open.
    pub is_showing: bool,
    /// Data associated with the modal, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
}

impl ModalEntry {
    /// A closed modal with no data.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            is_showing: false,
            data: None,
        }
    }

    /// An open modal carrying `data`.
    #[must_use]
    pub fn open(data: Option<Payload>) -> Self {
        Self {
            is_showing: true,
            data,
        }
    }
}

/// Snapshot of every modal in a set.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState {
    entries: OrdMap<ModalKey, Arc<ModalEntry>>,
}

impl ModalState {
    /// Every modal in `set` closed, without data.
    #[must_use]
    pub fn closed(set: &ModalSet) -> Self {
        let closed = Arc::new(ModalEntry::closed());
        Self {
            entries: set
                .iter()
                .map(|key| (key.clone(), Arc::clone(&closed)))
                .collect(),
        }
    }

    /// Build a snapshot from explicit entries.
    ///
    /// `null` data is stored as no data.
    ///
    /// # Errors
    ///
    /// - [`ModalError::UnexpectedModal`] for an entry whose key is not in `set`.
    /// - [`ModalError::DuplicateModal`] for a key given twice.
    /// - [`ModalError::MissingModal`] for a key of `set` with no entry.
    pub fn from_entries<I, K>(set: &ModalSet, entries: I) -> Result<Self, ModalError>
    where
        I: IntoIterator<Item = (K, ModalEntry)>,
        K: AsRef<str>,
    {
        let mut map = OrdMap::new();
        for (key, entry) in entries {
            let key = key.as_ref();
            let key = set
                .resolve(key)
                .map_err(|_| ModalError::UnexpectedModal(key.to_string()))?;
            let entry = ModalEntry {
                is_showing: entry.is_showing,
                data: normalize(entry.data),
            };
            if map.insert(key.clone(), Arc::new(entry)).is_some() {
                return Err(ModalError::DuplicateModal(key.to_string()));
            }
        }
        if let Some(missing) = set.iter().find(|key| !map.contains_key(key.as_str())) {
            return Err(ModalError::MissingModal(missing.to_string()));
        }
        Ok(Self { entries: map })
    }

    /// The entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::UnknownModal`] if `key` is not part of the set.
    pub fn get(&self, key: &str) -> Result<&ModalEntry, ModalError> {
        self.entry(key).map(|entry| &**entry)
    }

    /// The shared entry for `key`, for pointer-based change detection.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::UnknownModal`] if `key` is not part of the set.
    pub fn entry(&self, key: &str) -> Result<&Arc<ModalEntry>, ModalError> {
        self.entries
            .get(key)
            .ok_or_else(|| ModalError::UnknownModal(key.to_string()))
    }

    /// Whether `key` is open. Keys outside the set read as closed.
    #[must_use]
    pub fn is_showing(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|e| e.is_showing)
    }

    /// The data stored for `key`, if any.
    #[must_use]
    pub fn data(&self, key: &str) -> Option<&Payload> {
        self.entries.get(key).and_then(|e| e.data.as_ref())
    }

    /// Whether `key` has an entry.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys of every modal, in order.
    pub fn keys(&self) -> impl Iterator<Item = &ModalKey> {
        self.entries.keys()
    }

    /// Iterate over `(key, entry)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ModalKey, &ModalEntry)> {
        self.entries.iter().map(|(k, v)| (k, &**v))
    }

    /// Keys of the modals currently open.
    pub fn open_keys(&self) -> impl Iterator<Item = &ModalKey> {
        self.iter().filter(|(_, e)| e.is_showing).map(|(k, _)| k)
    }

    /// Number of modals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot covers no modals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The modal set this snapshot covers.
    #[must_use]
    pub fn modal_set(&self) -> ModalSet {
        // Keys come from an existing set, so they are already unique.
        ModalSet::new(self.entries.keys().cloned()).unwrap_or_default()
    }

    /// A new snapshot with `key` replaced. Other entries are shared.
    pub(crate) fn with_entry(&self, key: ModalKey, entry: ModalEntry) -> Self {
        Self {
            entries: self.entries.update(key, Arc::new(entry)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn demo_set() -> ModalSet {
        ModalSet::new(["modal1", "modal2", "modal3"]).unwrap()
    }

    #[test]
    fn closed_covers_every_key() {
        let state = ModalState::closed(&demo_set());
        assert_eq!(state.len(), 3);
        for key in ["modal1", "modal2", "modal3"] {
            assert_eq!(state.get(key).unwrap(), &ModalEntry::closed());
        }
        assert_eq!(state.open_keys().count(), 0);
    }

    #[test]
    fn from_entries_validates_shape() {
        let set = demo_set();
        let closed = ModalEntry::closed;

        let err = ModalState::from_entries(&set, [("modal1", closed()), ("modal2", closed())])
            .unwrap_err();
        assert_eq!(err, ModalError::MissingModal("modal3".into()));

        let err = ModalState::from_entries(
            &set,
            [
                ("modal1", closed()),
                ("modal2", closed()),
                ("modal3", closed()),
                ("modal4", closed()),
            ],
        )
        .unwrap_err();
        assert_eq!(err, ModalError::UnexpectedModal("modal4".into()));

        let err = ModalState::from_entries(
            &set,
            [
                ("modal1", closed()),
                ("modal1", closed()),
                ("modal2", closed()),
                ("modal3", closed()),
            ],
        )
        .unwrap_err();
        assert_eq!(err, ModalError::DuplicateModal("modal1".into()));
    }

    #[test]
    fn from_entries_keeps_initial_data() {
        let state = ModalState::from_entries(
            &demo_set(),
            [
                ("modal1", ModalEntry::open(Some(json!({"title": "hi"})))),
                ("modal2", ModalEntry::closed()),
                ("modal3", ModalEntry::closed()),
            ],
        )
        .unwrap();
        assert!(state.is_showing("modal1"));
        assert_eq!(state.data("modal1"), Some(&json!({"title": "hi"})));
        assert_eq!(state.open_keys().map(ModalKey::as_str).collect::<Vec<_>>(), ["modal1"]);
    }

    #[test]
    fn from_entries_drops_null_data() {
        let state = ModalState::from_entries(
            &demo_set(),
            [
                ("modal1", ModalEntry::open(Some(serde_json::Value::Null))),
                (
                    "modal2",
                    ModalEntry {
                        is_showing: false,
                        data: Some(serde_json::Value::Null),
                    },
                ),
                ("modal3", ModalEntry::closed()),
            ],
        )
        .unwrap();
        assert_eq!(state.data("modal1"), None);
        assert_eq!(state.get("modal2").unwrap(), &ModalEntry::closed());
        assert!(state.is_showing("modal1"));
    }

    #[test]
    fn unknown_key_lookups() {
        let state = ModalState::closed(&demo_set());
        assert_eq!(
            state.get("nope"),
            Err(ModalError::UnknownModal("nope".into()))
        );
        assert!(!state.is_showing("nope"));
        assert_eq!(state.data("nope"), None);
    }

    #[test]
    fn with_entry_shares_untouched_entries() {
        let state = ModalState::closed(&demo_set());
        let next = state.with_entry(ModalKey::new("modal1"), ModalEntry::open(None));
        assert!(Arc::ptr_eq(
            state.entry("modal2").unwrap(),
            next.entry("modal2").unwrap()
        ));
        assert!(!state.is_showing("modal1"));
        assert!(next.is_showing("modal1"));
    }

    #[test]
    fn modal_set_round_trips() {
        let set = demo_set();
        assert_eq!(ModalState::closed(&set).modal_set(), set);
    }
}
