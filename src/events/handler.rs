//! Event handler implementation.
//!
//! Polls for terminal events and converts them to application events.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind, MouseEventKind};

use super::Event;
use crate::config::DEFAULT_TICK_RATE_MS;

/// Handles application events by polling crossterm for terminal events.
pub struct EventHandler {
    /// The tick rate duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the default tick rate.
    pub fn new() -> Self {
        Self::with_tick_rate(DEFAULT_TICK_RATE_MS)
    }

    /// Create a new event handler with a custom tick rate.
    pub fn with_tick_rate(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event.
    ///
    /// Blocks until an event is available or the tick rate elapses.
    /// Returns `Event::Tick` if no event occurred within the tick rate.
    pub fn next(&self) -> std::io::Result<Event> {
        if event::poll(self.tick_rate)? {
            Ok(convert(event::read()?))
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a crossterm event onto an application event.
///
/// Only key presses and mouse button presses are forwarded; releases,
/// drags, scrolling, focus and paste events become ticks.
fn convert(event: CrosstermEvent) -> Event {
    match event {
        CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            Event::Key(key_event)
        }
        CrosstermEvent::Mouse(mouse_event)
            if matches!(mouse_event.kind, MouseEventKind::Down(_)) =>
        {
            Event::Mouse(mouse_event)
        }
        CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
        _ => Event::Tick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    };

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 4,
            row: 2,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_event_handler_new() {
        let handler = EventHandler::new();
        assert_eq!(handler.tick_rate, Duration::from_millis(DEFAULT_TICK_RATE_MS));
    }

    #[test]
    fn test_event_handler_with_tick_rate() {
        let handler = EventHandler::with_tick_rate(50);
        assert_eq!(handler.tick_rate, Duration::from_millis(50));
    }

    #[test]
    fn test_convert_key_press() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(convert(CrosstermEvent::Key(key)), Event::Key(key));
    }

    #[test]
    fn test_convert_key_release_is_ignored() {
        let key = KeyEvent {
            code: KeyCode::Char('s'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(convert(CrosstermEvent::Key(key)), Event::Tick);
    }

    #[test]
    fn test_convert_mouse_down() {
        let click = mouse(MouseEventKind::Down(MouseButton::Left));
        assert_eq!(convert(CrosstermEvent::Mouse(click)), Event::Mouse(click));
    }

    #[test]
    fn test_convert_mouse_move_is_ignored() {
        let moved = mouse(MouseEventKind::Moved);
        assert_eq!(convert(CrosstermEvent::Mouse(moved)), Event::Tick);
    }

    #[test]
    fn test_convert_resize() {
        assert_eq!(convert(CrosstermEvent::Resize(80, 24)), Event::Resize(80, 24));
    }
}
