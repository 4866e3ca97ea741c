//! Mouse drag-to-reorder state machine
//!
//! Tracks mouse-down → drag → mouse-up sequences over the list rows and
//! resolves them into a reorder, a plain click, or nothing. A drag only
//! activates once the pointer has moved at least [`DRAG_ACTIVATION_DISTANCE`]
//! cells (manhattan) from the press origin; terminal cells are the smallest
//! observable pointer unit, so one cell is the activation threshold.
//!
//! Entries are identified by value, not by row index: the press records the
//! entry value under the pointer, and the drop resolves both source and
//! target by value lookup in the list as it stands at release time. A stale
//! drag (the pressed value vanished mid-drag) or a drop on the source entry
//! resolves to nothing, and no write is issued.

/// Minimum manhattan distance (cells) before a press becomes a drag.
pub const DRAG_ACTIVATION_DISTANCE: u16 = 1;

/// An in-progress press or drag.
#[derive(Debug, Clone)]
struct Press {
    x: u16,
    y: u16,
    value: String,
    started: bool,
}

/// Outcome of releasing the mouse button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Sub-threshold press-and-release: select the row, nothing moves.
    Click,
    /// Resolved drag: move the entry at `old_index` to `new_index`.
    Reorder { old_index: usize, new_index: usize },
    /// Stale or degenerate drag; nothing happens.
    None,
}

/// Stateful drag recognizer for the history list.
#[derive(Debug, Default)]
pub struct DragController {
    press: Option<Press>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press over a list row. `value` is the entry rendered at the
    /// pressed row; a press over empty space clears any tracked state.
    pub fn on_mouse_down(&mut self, x: u16, y: u16, value: Option<String>) {
        self.press = value.map(|value| Press {
            x,
            y,
            value,
            started: false,
        });
    }

    /// Track pointer movement while the button is held.
    pub fn on_mouse_drag(&mut self, x: u16, y: u16) {
        if let Some(press) = &mut self.press {
            if !press.started {
                let distance = press.x.abs_diff(x) + press.y.abs_diff(y);
                if distance >= DRAG_ACTIVATION_DISTANCE {
                    press.started = true;
                }
            }
        }
    }

    /// Resolve the release. `over_value` is the entry rendered under the
    /// release position; `entries` is the list as it currently stands.
    pub fn on_mouse_up(&mut self, over_value: Option<&str>, entries: &[String]) -> DropOutcome {
        let Some(press) = self.press.take() else {
            return DropOutcome::None;
        };

        if !press.started {
            return DropOutcome::Click;
        }

        let Some(old_index) = entries.iter().position(|e| *e == press.value) else {
            // Stale drag: the pressed value is gone.
            return DropOutcome::None;
        };
        let Some(new_index) = over_value.and_then(|v| entries.iter().position(|e| e == v)) else {
            return DropOutcome::None;
        };

        if old_index == new_index {
            return DropOutcome::None;
        }
        DropOutcome::Reorder {
            old_index,
            new_index,
        }
    }

    /// Abandon the current press/drag (Escape, focus loss).
    pub fn cancel(&mut self) {
        self.press = None;
    }

    /// True once the press has crossed the activation threshold.
    pub fn is_dragging(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.started)
    }

    /// Value of the entry being dragged, for render-time dimming.
    pub fn source_value(&self) -> Option<&str> {
        self.press
            .as_ref()
            .filter(|p| p.started)
            .map(|p| p.value.as_str())
    }
}
