#![forbid(unsafe_code)]

//! The fixed collection of modal keys a store is built for.
//!
//! # Invariants
//!
//! 1. Keys are unique; construction rejects duplicates.
//! 2. The set never changes after construction.
//! 3. Iteration follows key order, independent of declaration order.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::ModalError;
use crate::key::ModalKey;

/// A closed, immutable set of modal keys.
///
/// Cloning shares the underlying storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalSet {
    keys: Arc<BTreeSet<ModalKey>>,
}

impl ModalSet {
    /// Build a set from the given keys.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::DuplicateModal`] if a key appears twice.
    pub fn new<I, K>(keys: I) -> Result<Self, ModalError>
    where
        I: IntoIterator<Item = K>,
        K: Into<ModalKey>,
    {
        let mut set = BTreeSet::new();
        for key in keys {
            let key = key.into();
            if set.contains(&key) {
                return Err(ModalError::DuplicateModal(key.to_string()));
            }
            set.insert(key);
        }
        Ok(Self {
            keys: Arc::new(set),
        })
    }

    /// Whether `key` belongs to this set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Resolve `key` to the set's own [`ModalKey`].
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::UnknownModal`] when `key` is not a member.
    pub fn resolve(&self, key: &str) -> Result<&ModalKey, ModalError> {
        self.keys
            .get(key)
            .ok_or_else(|| ModalError::UnknownModal(key.to_string()))
    }

    /// Iterate over the keys in order.
    pub fn iter(&self) -> impl Iterator<Item = &ModalKey> {
        self.keys.iter()
    }

    /// Number of modals in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set has no modals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<'a> IntoIterator for &'a ModalSet {
    type Item = &'a ModalKey;
    type IntoIter = std::collections::btree_set::Iter<'a, ModalKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicates() {
        let err = ModalSet::new(["a", "b", "a"]).unwrap_err();
        assert_eq!(err, ModalError::DuplicateModal("a".into()));
    }

    #[test]
    fn resolve_returns_shared_key() {
        let set = ModalSet::new(["modal1", "modal2"]).unwrap();
        let key = set.resolve("modal2").unwrap();
        assert_eq!(key, &"modal2");
        assert_eq!(
            set.resolve("modal9"),
            Err(ModalError::UnknownModal("modal9".into()))
        );
    }

    #[test]
    fn iterates_in_key_order() {
        let set = ModalSet::new(["c", "a", "b"]).unwrap();
        let keys: Vec<_> = set.iter().map(ModalKey::as_str).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
    }
}
