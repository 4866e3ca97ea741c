//! Terminal UI for the ClipCapsule history panel
//!
//! This module contains:
//! - Terminal setup and teardown
//! - Input polling and event translation
//! - The drag-to-reorder controller
//! - The history panel render tree and interaction dispatch

mod drag;
mod events;
mod panel;
mod terminal;
mod widgets;

pub use drag::{DragController, DropOutcome, DRAG_ACTIVATION_DISTANCE};
pub use events::{EventLoop, TuiEvent};
pub use panel::HistoryPanel;
pub use terminal::PanelTerminal;
pub use widgets::{entry_preview, spinner_frame, PANEL_BACKGROUND};
