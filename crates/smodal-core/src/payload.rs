#![forbid(unsafe_code)]

//! Modal payloads and the merge-data policy.
//!
//! A payload is a [`serde_json::Value`]. JSON `null` never appears as a
//! stored payload: it is normalized to "no value" on the way in.
//!
//! # Merge policy
//!
//! When the caller opts in and both the stored and the incoming payload are
//! structured records (JSON objects), the result is their shallow union with
//! incoming fields winning. In every other case the incoming payload replaces
//! the stored one, including when the incoming payload is absent.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ModalError;

/// Data associated with a modal.
pub type Payload = Value;

/// Whether `value` is a structured record eligible for merging.
///
/// Arrays, primitives, `null` and absent values are not.
#[inline]
#[must_use]
pub fn is_structured(value: Option<&Payload>) -> bool {
    matches!(value, Some(Value::Object(_)))
}

/// Combine the stored payload with an incoming one.
#[must_use]
pub fn merge_data(
    existing: Option<&Payload>,
    incoming: Option<Payload>,
    merge: bool,
) -> Option<Payload> {
    if !(merge && is_structured(existing) && is_structured(incoming.as_ref())) {
        return normalize(incoming);
    }
    match (existing, incoming) {
        (Some(Value::Object(current)), Some(Value::Object(update))) => {
            let mut merged = current.clone();
            merged.extend(update);
            Some(Value::Object(merged))
        }
        (_, incoming) => incoming,
    }
}

/// Map JSON `null` to "no value".
#[inline]
#[must_use]
pub fn normalize(value: Option<Payload>) -> Option<Payload> {
    value.filter(|v| !v.is_null())
}

/// Convert a typed value into a payload.
///
/// # Errors
///
/// Returns [`ModalError::Payload`] if serialization fails.
pub fn to_payload<T: Serialize + ?Sized>(data: &T) -> Result<Option<Payload>, ModalError> {
    serde_json::to_value(data)
        .map(|v| normalize(Some(v)))
        .map_err(|e| ModalError::Payload(e.to_string()))
}

/// Convert a stored payload back into a typed value.
///
/// # Errors
///
/// Returns [`ModalError::Payload`] if the payload does not fit `T`.
pub fn from_payload<T: DeserializeOwned>(payload: Option<&Payload>) -> Result<Option<T>, ModalError> {
    payload
        .map(|v| T::deserialize(v).map_err(|e| ModalError::Payload(e.to_string())))
        .transpose()
}
