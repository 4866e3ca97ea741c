//! ClipCapsule history panel
//!
//! Terminal front-end for the ClipCapsule clipboard manager. The panel
//! mirrors the backend-held history list and keeps it in sync through two
//! remote calls: read the ordered list, or replace it wholesale. Everything
//! the user does (drag or keyboard reorder, per-entry delete, two-phase
//! clear-all, refresh) is applied optimistically and pushed to the backend;
//! failed deletes and clears re-fetch authoritative state, failed reorders
//! are logged and left as-is.
//!
//! Layers:
//! - **backend**: the `HistoryStore` Read/Write contract plus the HTTP and
//!   in-memory implementations
//! - **history**: pure ordered-list operations
//! - **sync**: list state, UI flags, and the bridge pushing mutations
//! - **tui**: terminal setup, input translation, drag recognition, rendering

pub mod backend;
pub mod error;
pub mod history;
pub mod sync;
pub mod tui;

// Re-export commonly used types
pub use backend::{HistoryStore, HttpStore, MemoryStore};
pub use error::{PanelError, Result};
pub use sync::{BridgeEvent, HistorySync, WriteOp, CLEAR_CONFIRM_WINDOW, REFRESH_SETTLE};
pub use tui::{DragController, EventLoop, HistoryPanel, PanelTerminal, TuiEvent};
