use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub keys: Vec<(KeyCode, KeyModifiers)>,
    pub description: String,
}

impl KeyBinding {
    pub fn new(keys: &[(KeyCode, KeyModifiers)], description: &str) -> Self {
        Self {
            keys: keys.to_vec(),
            description: description.to_string(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys
            .iter()
            .any(|(code, modifiers)| *code == event.code && event.modifiers == *modifiers)
    }
}

/// What a key press asks the dialog to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Activate the focused button
    Activate,
    /// Move focus to the other button
    ToggleFocus,
    Confirm,
    Cancel,
    /// Activate the close affordance
    Close,
    /// Hand the key to the dialog controller unchanged
    Forward,
}

/// Terminal key mappings for the dialog
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub activate: KeyBinding,
    pub toggle_focus: KeyBinding,
    pub confirm: KeyBinding,
    pub cancel: KeyBinding,
    pub close: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        let none = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        Self {
            activate: KeyBinding::new(
                &[(KeyCode::Enter, none), (KeyCode::Char(' '), none)],
                "Enter/Space: Activate",
            ),
            toggle_focus: KeyBinding::new(
                &[
                    (KeyCode::Tab, none),
                    (KeyCode::BackTab, shift),
                    (KeyCode::Left, none),
                    (KeyCode::Right, none),
                ],
                "Tab/←/→: Select",
            ),
            confirm: KeyBinding::new(
                &[(KeyCode::Char('y'), none), (KeyCode::Char('Y'), shift)],
                "Y: Confirm",
            ),
            cancel: KeyBinding::new(
                &[(KeyCode::Char('n'), none), (KeyCode::Char('N'), shift)],
                "N: Cancel",
            ),
            close: KeyBinding::new(
                &[
                    (KeyCode::Char('x'), none),
                    (KeyCode::Char('c'), KeyModifiers::CONTROL),
                ],
                "X: Close",
            ),
        }
    }
}

impl KeyMap {
    pub fn action(&self, event: &KeyEvent) -> KeyAction {
        if self.activate.matches(event) {
            KeyAction::Activate
        } else if self.toggle_focus.matches(event) {
            KeyAction::ToggleFocus
        } else if self.confirm.matches(event) {
            KeyAction::Confirm
        } else if self.cancel.matches(event) {
            KeyAction::Cancel
        } else if self.close.matches(event) {
            KeyAction::Close
        } else {
            KeyAction::Forward
        }
    }

    /// One-line help for the footer
    pub fn help_text(&self) -> String {
        [
            &self.toggle_focus,
            &self.activate,
            &self.confirm,
            &self.cancel,
            &self.close,
        ]
        .iter()
        .map(|binding| binding.description.as_str())
        .chain(std::iter::once("Esc: Dismiss"))
        .collect::<Vec<_>>()
        .join(" • ")
    }
}
