//! Terminal setup and teardown
//!
//! The panel needs raw mode, the alternate screen, and mouse capture (drag
//! reordering is pointer-driven). All three are unconditionally enabled on
//! entry and restored on drop, so a panic or early return still leaves the
//! user's terminal usable.

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// RAII guard around the panel's terminal session.
pub struct PanelTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl PanelTerminal {
    /// Enter raw mode + alternate screen + mouse capture.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for PanelTerminal {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
