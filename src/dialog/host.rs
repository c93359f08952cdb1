//! Host document contract
//!
//! The controller never touches a concrete rendering environment. It works
//! through the opaque [`Element`] and [`Document`] capabilities defined here;
//! a browser binding, a terminal renderer, or the in-memory document used in
//! tests all plug in the same way.

use anyhow::Result;
use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Class that marks the dialog surface as shown
pub const SHOW_CLASS: &str = "show";

/// Display state of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    /// Whatever the host stylesheet decides
    #[default]
    Unset,
    None,
    Block,
    Flex,
}

/// A single element of the host document
pub trait Element: Send + Sync {
    /// Replace the content with literal text
    fn set_text(&self, text: &str) -> Result<()>;

    /// Replace the content with a parsed markup fragment
    fn set_markup(&self, markup: &str) -> Result<()>;

    /// Remove all content
    fn clear(&self) -> Result<()>;

    fn set_display(&self, display: Display) -> Result<()>;

    fn add_class(&self, class: &str) -> Result<()>;

    fn remove_class(&self, class: &str) -> Result<()>;

    fn has_class(&self, class: &str) -> bool;
}

/// Shared handle to a host element
pub type ElementRef = Arc<dyn Element>;

/// Identity comparison for element handles
pub fn same_element(a: &ElementRef, b: &ElementRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// The host document the dialog lives in
pub trait Document: Send + Sync {
    /// Look up an element by `#id`, `.class`, or bare id
    fn find(&self, selector: &str) -> Option<ElementRef>;

    /// Suppress or restore page-level scrolling
    fn set_scroll_locked(&self, locked: bool) -> Result<()>;
}

/// Selectors used to locate the dialog's elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSelectors {
    pub surface: String,
    pub title: String,
    pub body: String,
    pub close: String,
    pub cancel: String,
    pub confirm: String,
}

impl Default for ElementSelectors {
    fn default() -> Self {
        Self {
            surface: "#modal".to_string(),
            title: "#modal-title".to_string(),
            body: "#modal-body".to_string(),
            close: ".modal-close".to_string(),
            cancel: "#modal-cancel".to_string(),
            confirm: "#modal-confirm".to_string(),
        }
    }
}

impl ElementSelectors {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("surface", self.surface.as_str()),
            ("title", self.title.as_str()),
            ("body", self.body.as_str()),
            ("close", self.close.as_str()),
            ("cancel", self.cancel.as_str()),
            ("confirm", self.confirm.as_str()),
        ]
        .into_iter()
    }
}

/// Handles to the dialog's elements; any of them may be absent
#[derive(Clone, Default)]
pub struct DialogElements {
    pub surface: Option<ElementRef>,
    pub title: Option<ElementRef>,
    pub body: Option<ElementRef>,
    pub close: Option<ElementRef>,
    pub cancel: Option<ElementRef>,
    pub confirm: Option<ElementRef>,
}

impl DialogElements {
    /// Locate every element through the document, tolerating misses
    pub fn locate(document: &dyn Document, selectors: &ElementSelectors) -> Self {
        let elements = Self {
            surface: document.find(&selectors.surface),
            title: document.find(&selectors.title),
            body: document.find(&selectors.body),
            close: document.find(&selectors.close),
            cancel: document.find(&selectors.cancel),
            confirm: document.find(&selectors.confirm),
        };

        for (role, selector) in selectors.iter() {
            if !elements.has(role) {
                debug!("Modal element '{}' not found for selector '{}'", role, selector);
            }
        }

        elements
    }

    fn has(&self, role: &str) -> bool {
        match role {
            "surface" => self.surface.is_some(),
            "title" => self.title.is_some(),
            "body" => self.body.is_some(),
            "close" => self.close.is_some(),
            "cancel" => self.cancel.is_some(),
            "confirm" => self.confirm.is_some(),
            _ => false,
        }
    }
}

impl fmt::Debug for DialogElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogElements")
            .field("surface", &self.surface.is_some())
            .field("title", &self.title.is_some())
            .field("body", &self.body.is_some())
            .field("close", &self.close.is_some())
            .field("cancel", &self.cancel.is_some())
            .field("confirm", &self.confirm.is_some())
            .finish()
    }
}

/// Interaction forwarded by the host to the controller
#[derive(Clone)]
pub enum HostEvent {
    /// A click whose target is the given element
    Click(ElementRef),
    /// A key press anywhere in the document
    Key(KeyEvent),
}

impl HostEvent {
    pub fn click(target: ElementRef) -> Self {
        Self::Click(target)
    }
}

impl fmt::Debug for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click(target) => write!(f, "Click({:p})", Arc::as_ptr(target)),
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
        }
    }
}
