use crate::config::Config;
use crate::dialog::{DialogController, Display, ElementRef, ElementSelectors, HostEvent};
use crate::document::MemoryDocument;
use crate::tui::{events::Event, keys::{KeyAction, KeyMap}, styles::Theme, Frame};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::sync::Arc;
use tracing::debug;

const CLOSE_MARKER: &str = "[x]";
const MAX_WIDTH: u16 = 60;
const MIN_WIDTH: u16 = 24;

/// Which button Enter/Space activates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Confirm,
    Cancel,
}

/// Screen regions of the last rendered dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitAreas {
    pub dialog: Rect,
    pub close: Rect,
    pub cancel: Option<Rect>,
    pub confirm: Rect,
}

/// Terminal host for a single dialog
///
/// Draws the in-memory document's dialog and turns terminal input into the
/// clicks and key presses a page would deliver.
pub struct App {
    controller: DialogController,
    document: Arc<MemoryDocument>,
    selectors: ElementSelectors,
    key_map: KeyMap,
    theme: Theme,
    mouse_enabled: bool,
    focus: Focus,
    hit_areas: Option<HitAreas>,
}

impl App {
    pub fn new(controller: DialogController, document: Arc<MemoryDocument>, config: &Config) -> Self {
        let mut app = Self {
            controller,
            document,
            selectors: config.selectors.clone(),
            key_map: KeyMap::default(),
            theme: Theme::default(),
            mouse_enabled: !config.disable_mouse,
            focus: Focus::Confirm,
            hit_areas: None,
        };
        if app.cancel_visible() {
            app.focus = Focus::Cancel;
        }
        app
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn hit_areas(&self) -> Option<HitAreas> {
        self.hit_areas
    }

    /// Handle a terminal event, returns true when the dialog consumed it
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => match self.key_map.action(&key) {
                KeyAction::Activate => match self.focus {
                    Focus::Cancel if self.cancel_visible() => self.click(self.elements().cancel),
                    _ => self.click(self.elements().confirm),
                },
                KeyAction::ToggleFocus => {
                    if self.cancel_visible() {
                        self.focus = match self.focus {
                            Focus::Confirm => Focus::Cancel,
                            Focus::Cancel => Focus::Confirm,
                        };
                    }
                    true
                }
                KeyAction::Confirm => self.click(self.elements().confirm),
                KeyAction::Cancel => self.click(self.elements().cancel),
                KeyAction::Close => self.click(self.elements().close),
                KeyAction::Forward => self.controller.handle_event(&HostEvent::Key(key)),
            },
            Event::Mouse(mouse) if self.mouse_enabled => self.handle_mouse(mouse),
            Event::Mouse(_) | Event::Resize(..) | Event::Tick => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        let Some(areas) = self.hit_areas else {
            return false;
        };

        let (column, row) = (mouse.column, mouse.row);
        let elements = self.elements();
        let target = if contains(areas.close, column, row) {
            elements.close
        } else if contains(areas.confirm, column, row) {
            elements.confirm
        } else if areas.cancel.is_some_and(|cancel| contains(cancel, column, row)) {
            elements.cancel
        } else if contains(areas.dialog, column, row) {
            elements.body
        } else {
            elements.surface
        };

        debug!("Mouse click at ({}, {})", column, row);
        self.click(target)
    }

    fn click(&self, target: Option<ElementRef>) -> bool {
        target.is_some_and(|target| self.controller.handle_event(&HostEvent::click(target)))
    }

    fn elements(&self) -> crate::dialog::DialogElements {
        self.controller.elements().clone()
    }

    fn cancel_visible(&self) -> bool {
        self.document
            .element(&self.selectors.cancel)
            .is_some_and(|cancel| cancel.display() != Display::None)
    }

    fn text_of(&self, selector: &str) -> String {
        self.document
            .element(selector)
            .map(|element| element.text_content())
            .unwrap_or_default()
    }

    /// Render the dialog
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.size();
        frame.render_widget(Block::default().style(self.theme.backdrop_style()), area);

        if !self.controller.is_visible() {
            self.hit_areas = None;
            return;
        }

        let body = self.text_of(&self.selectors.body);
        let width = area.width.saturating_sub(4).clamp(MIN_WIDTH.min(area.width), MAX_WIDTH);
        let body_height = wrapped_height(&body, width.saturating_sub(4));
        let height = body_height.saturating_add(5).min(area.height);
        let dialog = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, dialog);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .style(self.theme.dialog_style())
            .title(Span::styled(
                format!(" {} ", self.text_of(&self.selectors.title)),
                self.theme.title_style(),
            ));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        // The marker sits on the top border and needs a corner on each side
        let close = if dialog.width >= CLOSE_MARKER.len() as u16 + 2 {
            Rect {
                x: dialog.x + dialog.width - CLOSE_MARKER.len() as u16 - 1,
                y: dialog.y,
                width: CLOSE_MARKER.len() as u16,
                height: 1,
            }
        } else {
            Rect::new(dialog.x, dialog.y, 0, 0)
        };
        if self.controller.elements().close.is_some() && !close.is_empty() {
            frame.render_widget(Paragraph::new(CLOSE_MARKER).style(self.theme.border_style()), close);
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Body
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Buttons
                Constraint::Length(1), // Help
            ])
            .split(inner)
            .iter()
            .map(|chunk| chunk.intersection(inner))
            .collect::<Vec<_>>();

        if !chunks[0].is_empty() {
            frame.render_widget(
                Paragraph::new(body)
                    .wrap(Wrap { trim: true })
                    .alignment(Alignment::Center),
                chunks[0],
            );
        }

        let (cancel, confirm) = self.render_buttons(frame, chunks[2]);

        if !chunks[3].is_empty() {
            frame.render_widget(
                Paragraph::new(self.key_map.help_text())
                    .style(self.theme.help_style())
                    .alignment(Alignment::Center),
                chunks[3],
            );
        }

        self.hit_areas = Some(HitAreas {
            dialog,
            close,
            cancel,
            confirm,
        });
    }

    /// Right-aligned buttons, returns the cancel and confirm regions
    fn render_buttons(&self, frame: &mut Frame, area: Rect) -> (Option<Rect>, Rect) {
        let confirm_label = format!(" {} ", self.text_of(&self.selectors.confirm));
        let confirm_width = (confirm_label.chars().count() as u16).min(area.width);
        let confirm = Rect {
            x: (area.x + area.width).saturating_sub(confirm_width + 1),
            y: area.y,
            width: confirm_width,
            height: 1,
        }
        .intersection(area);

        let confirm_focused = self.focus == Focus::Confirm || !self.cancel_visible();
        if !confirm.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(confirm_label))
                    .style(self.theme.button_style(confirm_focused)),
                confirm,
            );
        }

        if !self.cancel_visible() {
            return (None, confirm);
        }

        let cancel_label = format!(" {} ", self.text_of(&self.selectors.cancel));
        let cancel_width = (cancel_label.chars().count() as u16).min(confirm.x.saturating_sub(area.x + 2));
        let cancel = Rect {
            x: confirm.x.saturating_sub(cancel_width + 2),
            y: area.y,
            width: cancel_width,
            height: 1,
        }
        .intersection(area);
        if !cancel.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(cancel_label))
                    .style(self.theme.button_style(!confirm_focused)),
                cancel,
            );
        }

        (Some(cancel), confirm)
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Rows needed to show `text` wrapped at `width` columns
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = text
        .lines()
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    rows.max(1).min(usize::from(u16::MAX)) as u16
}
