//! Core dialog types
//!
//! Options accepted by [`DialogController::open`](super::DialogController::open)
//! and the errors a dialog request can settle with.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-argument callback run right before a request settles
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Result type for dialog requests
pub type DialogResult<T> = std::result::Result<T, DialogError>;

pub const DEFAULT_TITLE: &str = "Alert";
pub const DEFAULT_CONFIRM_TEXT: &str = "Confirm";
pub const DEFAULT_CANCEL_TEXT: &str = "Cancel";

/// Options for a single dialog request
#[derive(Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DialogOptions {
    /// Dialog title
    pub title: String,

    /// Body content, literal text unless `html` is set
    pub message: String,

    /// Insert `message` as a markup fragment instead of literal text
    #[serde(alias = "renderAsMarkup")]
    pub html: bool,

    /// Label of the confirm control
    #[serde(alias = "confirmLabel")]
    pub confirm_text: String,

    /// Label of the cancel control
    #[serde(alias = "cancelLabel")]
    pub cancel_text: String,

    /// Whether the cancel control is visible
    pub show_cancel: bool,

    /// Run before the request is fulfilled with `true`
    #[serde(skip)]
    pub on_confirm: Option<Callback>,

    /// Run before the request is rejected with [`DialogError::UserCancelled`]
    #[serde(skip)]
    pub on_cancel: Option<Callback>,
}

impl Default for DialogOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            message: String::new(),
            html: false,
            confirm_text: DEFAULT_CONFIRM_TEXT.to_string(),
            cancel_text: DEFAULT_CANCEL_TEXT.to_string(),
            show_cancel: true,
            on_confirm: None,
            on_cancel: None,
        }
    }
}

impl DialogOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }

    pub fn with_confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = text.into();
        self
    }

    pub fn with_cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }

    pub fn show_cancel(mut self, show: bool) -> Self {
        self.show_cancel = show;
        self
    }

    pub fn on_confirm(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_confirm = Some(Box::new(callback));
        self
    }

    pub fn on_cancel(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_cancel = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for DialogOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogOptions")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("html", &self.html)
            .field("confirm_text", &self.confirm_text)
            .field("cancel_text", &self.cancel_text)
            .field("show_cancel", &self.show_cancel)
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// Ways a dialog request can fail
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("Modal element not found")]
    ElementMissing,

    #[error("Modal was cancelled")]
    UserCancelled,

    #[error("Modal was closed by user")]
    UserClosed,

    #[error("Clicked outside modal")]
    ClickedOutside,

    #[error("Escape key pressed")]
    EscapePressed,

    /// The settler was dropped before any user action settled the request
    #[error("Modal request was abandoned before the user responded")]
    Abandoned,

    #[error("Failed to show modal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DialogError {
    /// True for rejections caused by the user dismissing the dialog
    pub fn is_dismissal(&self) -> bool {
        matches!(
            self,
            Self::UserCancelled | Self::UserClosed | Self::ClickedOutside | Self::EscapePressed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = DialogOptions::default();
        assert_eq!(options.title, "Alert");
        assert_eq!(options.message, "");
        assert!(!options.html);
        assert_eq!(options.confirm_text, "Confirm");
        assert_eq!(options.cancel_text, "Cancel");
        assert!(options.show_cancel);
        assert!(options.on_confirm.is_none());
        assert!(options.on_cancel.is_none());
    }

    #[test]
    fn test_builder() {
        let options = DialogOptions::new("Remove this item?")
            .with_title("Delete?")
            .with_confirm_text("Delete")
            .with_cancel_text("Keep")
            .show_cancel(false)
            .on_confirm(|| {});

        assert_eq!(options.title, "Delete?");
        assert_eq!(options.message, "Remove this item?");
        assert_eq!(options.confirm_text, "Delete");
        assert_eq!(options.cancel_text, "Keep");
        assert!(!options.show_cancel);
        assert!(options.on_confirm.is_some());

        let debug = format!("{:?}", options);
        assert!(debug.contains("on_confirm: true"));
        assert!(debug.contains("on_cancel: false"));
    }

    #[test]
    fn test_deserialize_option_keys() {
        let options: DialogOptions = serde_json::from_str(
            r#"{"title": "Delete?", "message": "<b>hi</b>", "html": true,
                "confirmText": "Delete", "cancelText": "Keep", "showCancel": false}"#,
        )
        .unwrap();

        assert_eq!(options.title, "Delete?");
        assert_eq!(options.message, "<b>hi</b>");
        assert!(options.html);
        assert_eq!(options.confirm_text, "Delete");
        assert_eq!(options.cancel_text, "Keep");
        assert!(!options.show_cancel);
    }

    #[test]
    fn test_deserialize_aliases_and_defaults() {
        let options: DialogOptions = serde_json::from_str(
            r#"{"renderAsMarkup": true, "confirmLabel": "Yes", "cancelLabel": "No"}"#,
        )
        .unwrap();

        assert!(options.html);
        assert_eq!(options.confirm_text, "Yes");
        assert_eq!(options.cancel_text, "No");
        assert_eq!(options.title, "Alert");
        assert_eq!(options.message, "");
        assert!(options.show_cancel);
    }

    #[test]
    fn test_error_classification() {
        assert!(DialogError::UserCancelled.is_dismissal());
        assert!(DialogError::UserClosed.is_dismissal());
        assert!(DialogError::ClickedOutside.is_dismissal());
        assert!(DialogError::EscapePressed.is_dismissal());
        assert!(!DialogError::ElementMissing.is_dismissal());
        assert!(!DialogError::Abandoned.is_dismissal());
        assert!(!DialogError::Internal(anyhow::anyhow!("boom")).is_dismissal());

        assert_eq!(DialogError::UserCancelled.to_string(), "Modal was cancelled");
        assert_eq!(
            DialogError::Internal(anyhow::anyhow!("boom")).to_string(),
            "Failed to show modal: boom"
        );
    }
}
