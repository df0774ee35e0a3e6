#![forbid(unsafe_code)]

//! The modal state reducer.
//!
//! [`reduce`] computes the next snapshot from the current one and a single
//! [`ModalAction`]. It has no side effects.
//!
//! # Transitions
//!
//! | Action | `is_showing` | `data` |
//! |--------|--------------|--------|
//! | Show | `true` | merge-or-replace with the action data |
//! | Hide | `false` | kept if `persist_data`, else cleared |
//! | Toggle (closed → open) | `true` | merge-or-replace with the action data |
//! | Toggle (open → closed) | `false` | cleared, regardless of any option |
//! | UpdateData | unchanged | merge-or-replace with the action data |
//!
//! # Invariants
//!
//! 1. Only the targeted entry changes; every other entry is pointer-equal to
//!    its predecessor.
//! 2. When the targeted entry comes out value-equal, the input snapshot is
//!    returned as is.
//! 3. The key set of the snapshot never changes.

use crate::action::ModalAction;
use crate::error::ModalError;
use crate::payload::merge_data;
use crate::state::{ModalEntry, ModalState};

/// Apply `action` to `state`.
///
/// # Errors
///
/// Returns [`ModalError::UnknownModal`] when the action targets a key
/// outside the snapshot. The input snapshot is left untouched.
pub fn reduce(state: &ModalState, action: ModalAction) -> Result<ModalState, ModalError> {
    let key = action.modal().clone();

    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!("modal_reduce", action = action.name(), modal = %key)
        .entered();

    let current = state.get(key.as_str())?;
    let next = match action {
        ModalAction::Show { data, options, .. } => ModalEntry {
            is_showing: true,
            data: merge_data(current.data.as_ref(), data, options.merge_data),
        },
        ModalAction::Hide { options, .. } => ModalEntry {
            is_showing: false,
            data: if options.persist_data {
                current.data.clone()
            } else {
                None
            },
        },
        ModalAction::Toggle { data, options, .. } => {
            if current.is_showing {
                ModalEntry::closed()
            } else {
                ModalEntry::open(merge_data(current.data.as_ref(), data, options.merge_data))
            }
        }
        ModalAction::UpdateData { data, options, .. } => ModalEntry {
            is_showing: current.is_showing,
            data: merge_data(current.data.as_ref(), Some(data), options.merge_data),
        },
    };

    if next == *current {
        return Ok(state.clone());
    }
    Ok(state.with_entry(key, next))
}

/// Apply a sequence of actions in order, stopping at the first error.
///
/// # Errors
///
/// Returns the first error [`reduce`] reports.
pub fn reduce_all<I>(state: &ModalState, actions: I) -> Result<ModalState, ModalError>
where
    I: IntoIterator<Item = ModalAction>,
{
    actions
        .into_iter()
        .try_fold(state.clone(), |acc, action| reduce(&acc, action))
}
