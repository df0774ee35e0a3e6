#![forbid(unsafe_code)]

//! Error type shared by every smodal crate.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Raised by |
//! |---------|-------|-----------|
//! | `UnknownModal` | Key outside the modal set | reducer, facade, `watch` |
//! | `DuplicateModal` | Key declared twice | `ModalSet::new`, `ModalState::from_entries` |
//! | `MissingModal` | Initial state lacks a key | `ModalState::from_entries` |
//! | `UnexpectedModal` | Initial state has an extra key | `ModalState::from_entries` |
//! | `UnknownAction` | Unrecognized `type` tag | `ModalAction::from_json` |
//! | `MalformedAction` | Bad JSON or bad fields | `ModalAction::from_json` |
//! | `Payload` | serde conversion failed | typed payload helpers |
//! | `NotInitialized` | No live store bound | context and facade |
//! | `Config` | Config file unreadable or invalid | runtime config loader |

/// Errors from modal state operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    /// The key is not a member of the modal set.
    UnknownModal(String),
    /// The key was declared more than once.
    DuplicateModal(String),
    /// An initial state did not provide an entry for this key.
    MissingModal(String),
    /// An initial state provided an entry for a key outside the modal set.
    UnexpectedModal(String),
    /// A decoded action carried a tag no variant recognizes.
    UnknownAction(String),
    /// A decoded action was not valid JSON or had invalid fields.
    MalformedAction(String),
    /// A payload could not be converted to or from its typed form.
    Payload(String),
    /// The facade was used without a live store behind it.
    NotInitialized,
    /// Configuration could not be read or parsed.
    Config(String),
}

impl std::fmt::Display for ModalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownModal(key) => write!(f, "unknown modal '{key}'"),
            Self::DuplicateModal(key) => write!(f, "modal '{key}' declared more than once"),
            Self::MissingModal(key) => write!(f, "initial state has no entry for modal '{key}'"),
            Self::UnexpectedModal(key) => {
                write!(f, "initial state has an entry for undeclared modal '{key}'")
            }
            Self::UnknownAction(tag) => write!(f, "unknown modal action '{tag}'"),
            Self::MalformedAction(msg) => write!(f, "malformed modal action: {msg}"),
            Self::Payload(msg) => write!(f, "modal payload error: {msg}"),
            Self::NotInitialized => {
                write!(f, "modal store not initialized: use modals within their provider")
            }
            Self::Config(msg) => write!(f, "modal config error: {msg}"),
        }
    }
}

impl std::error::Error for ModalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_key() {
        let err = ModalError::UnknownModal("settings".into());
        assert_eq!(err.to_string(), "unknown modal 'settings'");
    }

    #[test]
    fn not_initialized_mentions_provider() {
        assert!(ModalError::NotInitialized.to_string().contains("provider"));
    }

    #[test]
    fn is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&ModalError::Config("bad".into()));
    }
}
