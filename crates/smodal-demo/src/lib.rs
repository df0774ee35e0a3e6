#![forbid(unsafe_code)]

//! Playground for smodal.
//!
//! Declares three typed modals, builds their store from the bundled
//! `modal.config.toml`, and renders the visible dialogs plus the button row
//! as plain text. [`Button`] mirrors the clickable controls of the screen.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use smodal::prelude::*;

/// Bundled modal set declaration.
pub const MODAL_CONFIG: &str = include_str!("../demos/modal.config.toml");

/// Payload of the first modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub title: String,
    pub content: String,
}

/// Payload of the second modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
}

/// Payload of the third modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub info: String,
}

pub struct Modal1;
pub struct Modal2;
pub struct Modal3;

impl ModalKind for Modal1 {
    const KEY: &'static str = "modal1";
    type Data = Prompt;
}

impl ModalKind for Modal2 {
    const KEY: &'static str = "modal2";
    type Data = Notice;
}

impl ModalKind for Modal3 {
    const KEY: &'static str = "modal3";
    type Data = Info;
}

/// Store for the demo modal set.
///
/// # Errors
///
/// Returns [`ModalError::Config`] if the bundled config does not parse.
pub fn demo_store() -> Result<ModalStore, ModalError> {
    Ok(ModalConfig::from_toml_str(MODAL_CONFIG)?.into_store())
}

/// Clickable controls of the playground screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    ShowModal1,
    ShowModal2,
    ShowModal3,
    /// The button inside modal 1. It re-shows the modal with new content.
    UpdateModal1,
    CloseModal2,
    CloseModal3,
}

impl Button {
    /// Every button, in screen order.
    pub const ALL: [Button; 6] = [
        Button::ShowModal1,
        Button::ShowModal2,
        Button::ShowModal3,
        Button::UpdateModal1,
        Button::CloseModal2,
        Button::CloseModal3,
    ];

    /// Parse a command-line button name such as `show-modal1`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Command-line name of the button.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Button::ShowModal1 => "show-modal1",
            Button::ShowModal2 => "show-modal2",
            Button::ShowModal3 => "show-modal3",
            Button::UpdateModal1 => "update-modal1",
            Button::CloseModal2 => "close-modal2",
            Button::CloseModal3 => "close-modal3",
        }
    }

    /// Whether the button is on screen for the current state.
    ///
    /// # Errors
    ///
    /// Propagates facade errors.
    pub fn is_visible(self, modals: &Modals) -> Result<bool, ModalError> {
        Ok(match self {
            Button::ShowModal1 | Button::ShowModal2 | Button::ShowModal3 => true,
            Button::UpdateModal1 => modals.is_open::<Modal1>()?,
            Button::CloseModal2 => modals.is_open::<Modal2>()?,
            Button::CloseModal3 => modals.is_open::<Modal3>()?,
        })
    }
}

/// Click `button`.
///
/// Buttons inside a closed dialog are not on screen, so pressing them does
/// nothing.
///
/// # Errors
///
/// Propagates facade errors.
pub fn press(modals: &Modals, button: Button) -> Result<(), ModalError> {
    if !button.is_visible(modals)? {
        tracing::debug!(button = button.name(), "button not on screen");
        return Ok(());
    }
    let merge = MergeOptions::default();
    match button {
        Button::ShowModal1 => modals.show::<Modal1>(
            &Prompt {
                title: "Modal 1".into(),
                content: "This is modal 1".into(),
            },
            merge,
        ),
        Button::ShowModal2 => modals.show::<Modal2>(
            &Notice {
                message: "This is modal 2".into(),
            },
            merge,
        ),
        Button::ShowModal3 => modals.show::<Modal3>(
            &Info {
                info: "This is modal 3".into(),
            },
            merge,
        ),
        Button::UpdateModal1 => modals.show::<Modal1>(
            &Prompt {
                title: "Updated Modal 1".into(),
                content: "This is the updated content for modal 1".into(),
            },
            merge,
        ),
        Button::CloseModal2 => modals.hide::<Modal2>(HideOptions::default()),
        Button::CloseModal3 => modals.hide::<Modal3>(HideOptions::default()),
    }
}

/// Render the visible dialogs followed by the button row.
///
/// # Errors
///
/// Propagates facade errors.
pub fn render(modals: &Modals) -> Result<String, ModalError> {
    let mut out = String::new();

    if modals.is_open::<Modal1>()? {
        let (title, content) = modals
            .data::<Modal1>()?
            .map(|p| (p.title, p.content))
            .unwrap_or_default();
        dialog(&mut out, &[title.as_str(), content.as_str()]);
    }
    if modals.is_open::<Modal2>()? {
        let message = modals.data::<Modal2>()?.map(|n| n.message).unwrap_or_default();
        dialog(&mut out, &[message.as_str()]);
    }
    if modals.is_open::<Modal3>()? {
        let info = modals.data::<Modal3>()?.map(|i| i.info).unwrap_or_default();
        dialog(&mut out, &[info.as_str()]);
    }

    let _ = writeln!(out, "[Show Modal 1] [Show Modal 2] [Show Modal 3]");
    Ok(out)
}

fn dialog(out: &mut String, lines: &[&str]) {
    let _ = writeln!(out, "+--");
    for line in lines {
        let _ = writeln!(out, "| {line}");
    }
    let _ = writeln!(out, "| [Close]");
    let _ = writeln!(out, "+--");
}
