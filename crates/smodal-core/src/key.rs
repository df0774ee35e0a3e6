#![forbid(unsafe_code)]

//! Modal identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque identifier of one modal within a [`ModalSet`](crate::ModalSet).
///
/// Cloning is a reference-count bump. Ordering and equality follow the
/// underlying string, so a `ModalKey` can be looked up by `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalKey(Arc<str>);

impl ModalKey {
    /// Create a key from any string-like value.
    #[must_use]
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    /// The key as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ModalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModalKey({:?})", &*self.0)
    }
}

impl fmt::Display for ModalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ModalKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModalKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ModalKey {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl PartialEq<str> for ModalKey {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ModalKey {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Serialize for ModalKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ModalKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}
