//! In-memory host document
//!
//! Holds a flat set of [`MemoryElement`]s addressable by id or class. Used by
//! the terminal host as its model of the page, and by tests.

mod element;

pub use element::{Content, MemoryElement};

use crate::dialog::{Document, Element, ElementRef, ElementSelectors};
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: Vec<Arc<MemoryElement>>,
    scroll_locked: AtomicBool,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the dialog skeleton the controller expects
    ///
    /// Each selector produces one element: `#id` selectors become the element
    /// id, `.class` selectors become a class on an element named after it.
    pub fn with_dialog_markup(selectors: &ElementSelectors) -> Self {
        let mut document = Self::new();
        for (_, selector) in selectors.iter() {
            let element = match selector.strip_prefix('.') {
                Some(class) => MemoryElement::new(class, &[class]),
                None => MemoryElement::new(selector.trim_start_matches('#'), &[]),
            };
            document.insert(element);
        }
        document
    }

    pub fn insert(&mut self, element: MemoryElement) -> Arc<MemoryElement> {
        let element = Arc::new(element);
        self.elements.push(element.clone());
        element
    }

    /// Drop every element matching `selector`
    pub fn without(mut self, selector: &str) -> Self {
        self.elements.retain(|element| !matches(element, selector));
        self
    }

    /// Concrete element matching `selector`
    pub fn element(&self, selector: &str) -> Option<Arc<MemoryElement>> {
        self.elements
            .iter()
            .find(|element| matches(element, selector))
            .cloned()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked.load(Ordering::SeqCst)
    }
}

fn matches(element: &MemoryElement, selector: &str) -> bool {
    match selector.strip_prefix('.') {
        Some(class) => element.has_class(class),
        None => element.id() == selector.trim_start_matches('#'),
    }
}

impl Document for MemoryDocument {
    fn find(&self, selector: &str) -> Option<ElementRef> {
        self.element(selector).map(|element| element as ElementRef)
    }

    fn set_scroll_locked(&self, locked: bool) -> Result<()> {
        self.scroll_locked.store(locked, Ordering::SeqCst);
        Ok(())
    }
}
