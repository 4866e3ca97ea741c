//! Input polling and event translation

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use std::time::Duration;

/// Events driving the panel loop
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Key press event
    Key(KeyEvent),

    /// Mouse event (press, drag, release, scroll)
    Mouse(MouseEvent),

    /// Window resize event
    Resize(u16, u16),

    /// Tick event (no input within the poll window)
    Tick,

    /// Quit shortcut pressed
    Quit,
}

/// Polling input loop for the panel
pub struct EventLoop {
    /// Poll window in milliseconds; doubles as the tick rate
    tick_rate: u64,
}

impl EventLoop {
    pub fn new(tick_rate: u64) -> Self {
        Self { tick_rate }
    }

    /// Poll for the next event, yielding `Tick` when the window elapses
    /// without input.
    pub fn poll_event(&self) -> Result<TuiEvent> {
        if event::poll(Duration::from_millis(self.tick_rate))? {
            match event::read()? {
                Event::Key(key) => {
                    if Self::is_quit_key(&key) {
                        return Ok(TuiEvent::Quit);
                    }
                    return Ok(TuiEvent::Key(key));
                }
                Event::Mouse(mouse) => return Ok(TuiEvent::Mouse(mouse)),
                Event::Resize(w, h) => return Ok(TuiEvent::Resize(w, h)),
                _ => {}
            }
        }
        Ok(TuiEvent::Tick)
    }

    /// Ctrl+C or Ctrl+Q always quit, regardless of panel state.
    fn is_quit_key(key: &KeyEvent) -> bool {
        matches!(
            (key.code, key.modifiers),
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
                | (KeyCode::Char('q'), KeyModifiers::CONTROL)
        )
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(100)
    }
}
