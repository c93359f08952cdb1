use crate::dialog::{Display, Element};
use anyhow::{bail, Result};
use scraper::Html;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Rendered content of an element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    #[default]
    Empty,
    /// Literal text, never interpreted as markup
    Text(String),
    /// Parsed markup fragment
    Markup {
        /// Serialized fragment after parsing
        html: String,
        /// Concatenated text nodes
        text: String,
    },
}

impl Content {
    fn parse_fragment(markup: &str) -> Self {
        let fragment = Html::parse_fragment(markup);
        let root = fragment.root_element();
        Self::Markup {
            html: root.inner_html(),
            text: root.text().collect(),
        }
    }
}

#[derive(Debug, Default)]
struct ElementState {
    content: Content,
    display: Display,
    classes: BTreeSet<String>,
    detached: bool,
}

/// Element of a [`MemoryDocument`](super::MemoryDocument)
#[derive(Debug)]
pub struct MemoryElement {
    id: String,
    state: Mutex<ElementState>,
}

impl MemoryElement {
    pub fn new(id: impl Into<String>, classes: &[&str]) -> Self {
        Self {
            id: id.into(),
            state: Mutex::new(ElementState {
                classes: classes.iter().map(|class| class.to_string()).collect(),
                ..ElementState::default()
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> Content {
        self.state().content.clone()
    }

    /// Text as a reader would see it, with markup stripped
    pub fn text_content(&self) -> String {
        match &self.state().content {
            Content::Empty => String::new(),
            Content::Text(text) => text.clone(),
            Content::Markup { text, .. } => text.clone(),
        }
    }

    /// Serialized markup, if the content was set as markup
    pub fn inner_html(&self) -> Option<String> {
        match &self.state().content {
            Content::Markup { html, .. } => Some(html.clone()),
            _ => None,
        }
    }

    pub fn display(&self) -> Display {
        self.state().display
    }

    /// Make every further mutation fail, as if the node left the document
    pub fn detach(&self) {
        self.state().detached = true;
    }

    fn state(&self) -> MutexGuard<'_, ElementState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn attached(&self) -> Result<MutexGuard<'_, ElementState>> {
        let state = self.state();
        if state.detached {
            bail!("element '{}' is detached from the document", self.id);
        }
        Ok(state)
    }
}

impl Element for MemoryElement {
    fn set_text(&self, text: &str) -> Result<()> {
        self.attached()?.content = Content::Text(text.to_string());
        Ok(())
    }

    fn set_markup(&self, markup: &str) -> Result<()> {
        let content = Content::parse_fragment(markup);
        self.attached()?.content = content;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.attached()?.content = Content::Empty;
        Ok(())
    }

    fn set_display(&self, display: Display) -> Result<()> {
        self.attached()?.display = display;
        Ok(())
    }

    fn add_class(&self, class: &str) -> Result<()> {
        self.attached()?.classes.insert(class.to_string());
        Ok(())
    }

    fn remove_class(&self, class: &str) -> Result<()> {
        self.attached()?.classes.remove(class);
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.state().classes.contains(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_literal() {
        let element = MemoryElement::new("body", &[]);
        element.set_text("<i>x</i> & y").unwrap();
        assert_eq!(element.text_content(), "<i>x</i> & y");
        assert!(element.inner_html().is_none());
    }

    #[test]
    fn test_markup_is_parsed() {
        let element = MemoryElement::new("body", &[]);
        element.set_markup("<p>Delete <b>all</b> files?</p>").unwrap();
        assert_eq!(element.text_content(), "Delete all files?");
        assert_eq!(
            element.inner_html().as_deref(),
            Some("<p>Delete <b>all</b> files?</p>")
        );
    }

    #[test]
    fn test_classes_and_display() {
        let element = MemoryElement::new("modal", &["modal"]);
        assert!(element.has_class("modal"));
        assert_eq!(element.display(), Display::Unset);

        element.add_class("show").unwrap();
        element.set_display(Display::Flex).unwrap();
        assert!(element.has_class("show"));
        assert_eq!(element.display(), Display::Flex);

        element.remove_class("show").unwrap();
        element.remove_class("show").unwrap();
        assert!(!element.has_class("show"));
    }

    #[test]
    fn test_detached_element_fails() {
        let element = MemoryElement::new("body", &[]);
        element.set_text("before").unwrap();
        element.detach();

        let err = element.set_text("after").unwrap_err();
        assert!(err.to_string().contains("detached"));
        assert!(element.clear().is_err());
        assert_eq!(element.text_content(), "before");
    }
}
