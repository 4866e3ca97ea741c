//! Small presentational helpers shared by the panel render tree

use ratatui::style::Color;

/// Application background, carried over from the desktop shell.
pub const PANEL_BACKGROUND: Color = Color::Rgb(27, 38, 54);

/// Braille spinner shown on the refresh affordance while a fetch is in
/// flight.
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Single-line preview of a clipboard entry: control characters become
/// spaces, and anything past `max_chars` is truncated with an ellipsis.
pub fn entry_preview(value: &str, max_chars: usize) -> String {
    let total = value.chars().count();
    let mut preview = String::with_capacity(value.len().min(max_chars));
    for (i, c) in value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .enumerate()
    {
        if total > max_chars && i + 1 >= max_chars {
            preview.push('…');
            break;
        }
        preview.push(c);
    }
    preview
}
