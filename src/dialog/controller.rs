//! Dialog controller
//!
//! Owns the handles to one dialog surface, keeps the single outstanding
//! request, and settles it from the user's interaction.

use super::host::{
    same_element, DialogElements, Display, Document, Element, ElementRef, ElementSelectors,
    HostEvent, SHOW_CLASS,
};
use super::request::{self, PendingDialog, Settler};
use super::types::{Callback, DialogError, DialogOptions};
use anyhow::Result;
use crossterm::event::KeyCode;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Click handler installed on the confirm or cancel control for one request
struct Binding {
    callback: Option<Callback>,
}

impl Binding {
    fn new(callback: Option<Callback>) -> Self {
        Self { callback }
    }

    fn run(self) {
        if let Some(callback) = self.callback {
            callback();
        }
    }
}

#[derive(Default)]
struct ControllerState {
    /// Settlement handle of the outstanding request
    settler: Option<Settler>,
    confirm_binding: Option<Binding>,
    cancel_binding: Option<Binding>,
}

struct Inner {
    elements: DialogElements,
    document: Arc<dyn Document>,
    state: Mutex<ControllerState>,
}

/// Controller for a single confirm/alert dialog
///
/// Cloning yields another handle to the same dialog.
#[derive(Clone)]
pub struct DialogController {
    inner: Arc<Inner>,
}

impl DialogController {
    /// Create a controller over already-located element handles
    pub fn new(elements: DialogElements, document: Arc<dyn Document>) -> Self {
        debug!("Modal elements initialized: {:?}", elements);
        Self {
            inner: Arc::new(Inner {
                elements,
                document,
                state: Mutex::new(ControllerState::default()),
            }),
        }
    }

    /// Locate the dialog's elements in `document` and create a controller
    pub fn attach(document: Arc<dyn Document>, selectors: &ElementSelectors) -> Self {
        info!("Initializing modal");
        let elements = DialogElements::locate(document.as_ref(), selectors);
        let controller = Self::new(elements, document);
        info!("Modal initialization complete");
        controller
    }

    pub fn elements(&self) -> &DialogElements {
        &self.inner.elements
    }

    /// Show the dialog and return a future for the user's answer
    ///
    /// Any request still outstanding is replaced; its future resolves to
    /// [`DialogError::Abandoned`].
    pub fn open(&self, options: DialogOptions) -> PendingDialog {
        info!(
            "Showing modal: title={:?} confirm={:?} cancel={:?} show_cancel={}",
            options.title, options.confirm_text, options.cancel_text, options.show_cancel
        );

        let (settler, pending) = request::channel();

        let Some(surface) = self.inner.elements.surface.clone() else {
            error!("Modal element not found");
            settler.reject(DialogError::ElementMissing);
            return pending;
        };

        let DialogOptions {
            title,
            message,
            html,
            confirm_text,
            cancel_text,
            show_cancel,
            on_confirm,
            on_cancel,
        } = options;

        let confirm_binding = self
            .inner
            .elements
            .confirm
            .as_ref()
            .map(|_| Binding::new(on_confirm));
        let cancel_binding = match &self.inner.elements.cancel {
            Some(_) if show_cancel => Some(Binding::new(on_cancel)),
            _ => None,
        };

        // Dropped after the lock is released.
        let (replaced, old_bindings) = {
            let mut state = self.state();
            (
                state.settler.replace(settler),
                (
                    std::mem::replace(&mut state.confirm_binding, confirm_binding),
                    std::mem::replace(&mut state.cancel_binding, cancel_binding),
                ),
            )
        };
        if replaced.is_some() {
            warn!("Replacing a pending modal request; its caller observes an abandoned result");
        }
        drop((replaced, old_bindings));

        let shown = self.render(&title, &message, html).and_then(|_| {
            self.render_buttons(&confirm_text, &cancel_text, show_cancel)?;
            self.show_surface(&surface)
        });

        if let Err(e) = shown {
            error!("Error showing modal: {:#}", e);
            let settler = self.state().settler.take();
            self.hide();
            if let Some(settler) = settler {
                settler.reject(DialogError::Internal(e));
            }
        }

        pending
    }

    /// Hide the dialog and drop the outstanding request, if any
    pub fn hide(&self) {
        let Some(surface) = &self.inner.elements.surface else {
            return;
        };

        debug!("Hiding modal");
        log_failure(surface.remove_class(SHOW_CLASS), "remove show class");
        log_failure(surface.set_display(Display::None), "hide surface");
        log_failure(self.inner.document.set_scroll_locked(false), "restore scrolling");
        self.cleanup();
    }

    /// Route a host interaction to the dialog
    ///
    /// Returns true when the event was consumed by the dialog.
    pub fn handle_event(&self, event: &HostEvent) -> bool {
        match event {
            HostEvent::Click(target) => self.handle_click(target),
            HostEvent::Key(key) => {
                if key.code == KeyCode::Esc && self.is_visible() {
                    debug!("Escape pressed while modal visible");
                    self.dismiss(DialogError::EscapePressed);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Whether the surface currently carries the show marker
    pub fn is_visible(&self) -> bool {
        self.inner
            .elements
            .surface
            .as_ref()
            .is_some_and(|surface| surface.has_class(SHOW_CLASS))
    }

    pub fn is_pending(&self) -> bool {
        self.state().settler.is_some()
    }

    /// Whether a click handler is installed on the confirm or cancel control
    pub fn has_bindings(&self) -> bool {
        let state = self.state();
        state.confirm_binding.is_some() || state.cancel_binding.is_some()
    }

    fn handle_click(&self, target: &ElementRef) -> bool {
        let elements = &self.inner.elements;
        let is = |element: &Option<ElementRef>| {
            element.as_ref().is_some_and(|element| same_element(element, target))
        };

        if is(&elements.confirm) {
            self.activate_confirm()
        } else if is(&elements.cancel) {
            self.activate_cancel()
        } else if is(&elements.close) {
            debug!("Modal close clicked");
            self.dismiss(DialogError::UserClosed);
            true
        } else if is(&elements.surface) {
            debug!("Clicked outside modal content");
            self.dismiss(DialogError::ClickedOutside);
            true
        } else {
            false
        }
    }

    fn activate_confirm(&self) -> bool {
        let (binding, settler) = {
            let mut state = self.state();
            let Some(binding) = state.confirm_binding.take() else {
                return false;
            };
            (binding, state.settler.take())
        };

        debug!("Modal confirm button clicked");
        self.hide();
        binding.run();
        if let Some(settler) = settler {
            settler.resolve(true);
        }
        true
    }

    fn activate_cancel(&self) -> bool {
        let (binding, settler) = {
            let mut state = self.state();
            let Some(binding) = state.cancel_binding.take() else {
                return false;
            };
            (binding, state.settler.take())
        };

        debug!("Modal cancel button clicked");
        self.hide();
        binding.run();
        if let Some(settler) = settler {
            settler.reject(DialogError::UserCancelled);
        }
        true
    }

    /// Hide, then reject the outstanding request with `reason`
    fn dismiss(&self, reason: DialogError) {
        let settler = self.state().settler.take();
        self.hide();
        if let Some(settler) = settler {
            settler.reject(reason);
        }
    }

    fn render(&self, title: &str, message: &str, html: bool) -> Result<()> {
        let elements = &self.inner.elements;
        if let Some(node) = &elements.title {
            node.set_text(title)?;
        }
        if let Some(node) = &elements.body {
            if html {
                node.set_markup(message)?;
            } else {
                node.set_text(message)?;
            }
        }
        Ok(())
    }

    fn render_buttons(&self, confirm_text: &str, cancel_text: &str, show_cancel: bool) -> Result<()> {
        let elements = &self.inner.elements;
        if let Some(confirm) = &elements.confirm {
            confirm.set_text(confirm_text)?;
        }
        if let Some(cancel) = &elements.cancel {
            cancel.set_text(cancel_text)?;
            cancel.set_display(if show_cancel { Display::Block } else { Display::None })?;
        }
        Ok(())
    }

    fn show_surface(&self, surface: &ElementRef) -> Result<()> {
        debug!("Adding show class");
        surface.set_display(Display::Flex)?;
        surface.add_class(SHOW_CLASS)?;
        self.inner.document.set_scroll_locked(true)
    }

    fn cleanup(&self) {
        debug!("Cleaning up modal");
        // Dropped after the lock is released.
        let (_bindings, _settler) = {
            let mut state = self.state();
            (
                (state.confirm_binding.take(), state.cancel_binding.take()),
                state.settler.take(),
            )
        };

        let elements = &self.inner.elements;
        if let Some(node) = &elements.title {
            log_failure(node.clear(), "clear title");
        }
        if let Some(node) = &elements.body {
            log_failure(node.clear(), "clear body");
        }
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn log_failure(result: Result<()>, action: &str) {
    if let Err(e) = result {
        warn!("Modal failed to {}: {:#}", action, e);
    }
}
