//! History panel: render tree and interaction dispatch
//!
//! Purely presentational over [`HistorySync`]: every frame is recomputed from
//! the list state and UI flags. The panel also owns the cursor-side state the
//! backend never sees (selection, scroll offset, the drag controller) and
//! translates key and mouse input into bridge operations.

use super::drag::{DragController, DropOutcome};
use super::widgets::{entry_preview, spinner_frame, PANEL_BACKGROUND};
use crate::sync::HistorySync;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

/// Columns reserved for the row number prefix.
const NUMBER_WIDTH: usize = 4;
/// Columns reserved for the per-row delete affordance at the right edge.
const DELETE_WIDTH: usize = 2;

const EMPTY_MESSAGE: &str = "No clipboard history found. Copy something to get started!";
const LOADING_MESSAGE: &str = "Loading…";

/// Screen regions recorded during render for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default)]
struct PanelAreas {
    refresh_button: Rect,
    clear_button: Rect,
    list_inner: Rect,
}

/// The ClipCapsule history panel.
pub struct HistoryPanel {
    selected: usize,
    scroll: usize,
    hover: Option<usize>,
    drag: DragController,
    areas: PanelAreas,
}

impl HistoryPanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            scroll: 0,
            hover: None,
            drag: DragController::new(),
            areas: PanelAreas::default(),
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn render(&mut self, frame: &mut Frame, sync: &HistorySync, tick: usize) {
        let area = frame.area();
        self.clamp_selection(sync.entries().len());

        // Decorative background behind everything else.
        frame.render_widget(
            Block::default().style(Style::default().bg(PANEL_BACKGROUND)),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(frame, chunks[0], sync, tick);
        self.render_list(frame, chunks[1], sync);
        self.render_footer(frame, chunks[2]);
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect, sync: &HistorySync, tick: usize) {
        let block = Block::default()
            .title(" ClipCapsule ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(14),
                Constraint::Length(16),
            ])
            .split(inner);
        self.areas.refresh_button = columns[1];
        self.areas.clear_button = columns[2];

        let status = Paragraph::new(format!(" {} entries", sync.entries().len()))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(status, columns[0]);

        let refresh = if sync.is_refreshing() {
            Paragraph::new(format!("{} Refreshing", spinner_frame(tick)))
                .style(Style::default().fg(Color::Cyan))
        } else {
            Paragraph::new("⟳ Refresh").style(Style::default().fg(Color::Cyan))
        };
        frame.render_widget(refresh.alignment(Alignment::Center), columns[1]);

        let clear = if sync.is_clearing() {
            Paragraph::new("Clearing…").style(Style::default().fg(Color::DarkGray))
        } else if sync.confirm_clear_pending() {
            Paragraph::new("Confirm clear?").style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
        } else if !sync.clear_all_enabled() {
            Paragraph::new("Clear All").style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new("Clear All").style(Style::default().fg(Color::LightRed))
        };
        frame.render_widget(clear.alignment(Alignment::Center), columns[2]);
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect, sync: &HistorySync) {
        let block = Block::default()
            .title(" History ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.areas.list_inner = inner;

        let entries = sync.entries();
        if entries.is_empty() {
            let message = if sync.is_refreshing() {
                LOADING_MESSAGE
            } else {
                EMPTY_MESSAGE
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }

        let height = inner.height as usize;
        self.clamp_scroll(entries.len(), height);
        let preview_width = (inner.width as usize).saturating_sub(NUMBER_WIDTH + DELETE_WIDTH + 1);

        let mut lines = Vec::with_capacity(height);
        for (index, value) in entries
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(height)
        {
            let is_drag_source = self.drag.source_value() == Some(value.as_str());
            let is_hover_target = self.drag.is_dragging() && self.hover == Some(index);

            let mut row_style = Style::default().fg(Color::White);
            if is_drag_source {
                row_style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM);
            } else if index == self.selected {
                row_style = row_style
                    .bg(Color::Rgb(45, 62, 88))
                    .add_modifier(Modifier::BOLD);
            }
            if is_hover_target {
                row_style = row_style.add_modifier(Modifier::UNDERLINED);
            }

            let preview = entry_preview(value, preview_width);
            lines.push(
                Line::from(vec![
                    Span::styled(
                        format!("{:>3} ", index + 1),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(format!("{:<width$} ", preview, width = preview_width)),
                    Span::styled("✕", Style::default().fg(Color::LightRed)),
                ])
                .style(row_style),
            );
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = Paragraph::new(
            "j/k: Select | Shift+j/k: Move | d: Delete | r: Refresh | c: Clear | q: Quit | Paste: CTRL+SHIFT+[1-9]",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hints, area);
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Handle a key press. Returns true when the panel should quit.
    pub fn handle_key(&mut self, key: KeyEvent, sync: &mut HistorySync, now: Instant) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
            (KeyCode::Esc, _) => {
                if self.drag.is_dragging() {
                    self.drag.cancel();
                    self.hover = None;
                } else {
                    return true;
                }
            }
            (KeyCode::Up, KeyModifiers::SHIFT) | (KeyCode::Char('K'), _) => {
                self.move_selected_up(sync);
            }
            (KeyCode::Down, KeyModifiers::SHIFT) | (KeyCode::Char('J'), _) => {
                self.move_selected_down(sync);
            }
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
                self.selected = self.selected.saturating_sub(1);
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
                self.select_down(sync.entries().len());
            }
            (KeyCode::Char('d'), _) | (KeyCode::Delete, _) => {
                self.delete_selected(sync);
            }
            (KeyCode::Char('r'), _) => sync.fetch_history(),
            (KeyCode::Char('c'), _) => sync.clear_all(now),
            _ => {}
        }
        false
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, sync: &mut HistorySync, now: Instant) {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.areas.refresh_button.contains(position) {
                    sync.fetch_history();
                } else if self.areas.clear_button.contains(position) {
                    sync.clear_all(now);
                } else if let Some(index) = self.entry_at(mouse.column, mouse.row, sync) {
                    self.selected = index;
                    if self.in_delete_zone(mouse.column) {
                        self.delete_selected(sync);
                    } else {
                        let value = sync.entries()[index].clone();
                        self.drag.on_mouse_down(mouse.column, mouse.row, Some(value));
                    }
                } else {
                    self.drag.on_mouse_down(mouse.column, mouse.row, None);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag.on_mouse_drag(mouse.column, mouse.row);
                self.hover = if self.drag.is_dragging() {
                    self.entry_at(mouse.column, mouse.row, sync)
                } else {
                    None
                };
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let over_index = self.entry_at(mouse.column, mouse.row, sync);
                let over_value = over_index.map(|i| sync.entries()[i].clone());
                match self.drag.on_mouse_up(over_value.as_deref(), sync.entries()) {
                    DropOutcome::Click => {
                        if let Some(index) = over_index {
                            self.selected = index;
                        }
                    }
                    DropOutcome::Reorder {
                        old_index,
                        new_index,
                    } => {
                        sync.reorder(old_index, new_index);
                        self.selected = new_index;
                    }
                    DropOutcome::None => {}
                }
                self.hover = None;
            }
            MouseEventKind::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
            }
            MouseEventKind::ScrollDown => {
                self.select_down(sync.entries().len());
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn select_down(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    fn move_selected_up(&mut self, sync: &mut HistorySync) {
        if self.selected > 0 {
            sync.reorder(self.selected, self.selected - 1);
            self.selected -= 1;
        }
    }

    fn move_selected_down(&mut self, sync: &mut HistorySync) {
        if self.selected + 1 < sync.entries().len() {
            sync.reorder(self.selected, self.selected + 1);
            self.selected += 1;
        }
    }

    fn delete_selected(&mut self, sync: &mut HistorySync) {
        if let Some(value) = sync.entries().get(self.selected).cloned() {
            sync.delete_entry(&value);
            self.clamp_selection(sync.entries().len());
        }
    }

    fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn clamp_scroll(&mut self, len: usize, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }
        self.scroll = self.scroll.min(len.saturating_sub(height.min(len)));
    }

    /// Entry index rendered at screen position (x, y), if any.
    fn entry_at(&self, x: u16, y: u16, sync: &HistorySync) -> Option<usize> {
        let inner = self.areas.list_inner;
        if !inner.contains(Position::new(x, y)) {
            return None;
        }
        let index = self.scroll + (y - inner.y) as usize;
        (index < sync.entries().len()).then_some(index)
    }

    /// The per-row `✕` occupies the last columns of the list body.
    fn in_delete_zone(&self, x: u16) -> bool {
        let inner = self.areas.list_inner;
        inner.width as usize > DELETE_WIDTH && x >= inner.right() - DELETE_WIDTH as u16
    }
}

impl Default for HistoryPanel {
    fn default() -> Self {
        Self::new()
    }
}
