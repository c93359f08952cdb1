use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;

/// Terminal events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Mouse input event
    Mouse(MouseEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// Periodic tick event
    Tick,
}

/// Event handler for terminal input
pub struct EventHandler {
    /// How long to wait for input before emitting a tick
    tick_interval: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
        }
    }

    /// Wait for the next terminal event, or a tick once the interval passes
    pub async fn next(&mut self) -> Result<Event> {
        let tick_interval = self.tick_interval;
        let polled = tokio::task::spawn_blocking(move || -> std::io::Result<Option<CrosstermEvent>> {
            if crossterm::event::poll(tick_interval)? {
                crossterm::event::read().map(Some)
            } else {
                Ok(None)
            }
        })
        .await??;

        Ok(polled.and_then(Self::convert_crossterm_event).unwrap_or(Event::Tick))
    }

    /// Convert crossterm events to application events
    fn convert_crossterm_event(event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                Some(Event::Key(key_event))
            }
            CrosstermEvent::Mouse(mouse_event) => Some(Event::Mouse(mouse_event)),
            CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
            _ => None,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_release_events_are_dropped() {
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        release.state = KeyEventState::NONE;

        assert_eq!(EventHandler::convert_crossterm_event(CrosstermEvent::Key(release)), None);

        let press = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            EventHandler::convert_crossterm_event(CrosstermEvent::Key(press)),
            Some(Event::Key(press))
        );
        assert_eq!(
            EventHandler::convert_crossterm_event(CrosstermEvent::FocusGained),
            None
        );
    }
}
