//! Common view rendering helpers.

use crate::state::App;
use crate::theme::SynthBruteTheme;
use crate::widgets::InputField;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Two-column split with the left column taking `left_percent`.
pub fn two_column(area: Rect, left_percent: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Rectangle centered in `area`, sized as a percentage of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Themed input field. `editing` only applies while focused.
pub fn input_field<'a>(
    app: &App,
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
) -> InputField<'a> {
    themed_input(&app.theme, label, value, placeholder, focused, focused && app.is_editing())
}

fn themed_input<'a>(
    theme: &SynthBruteTheme,
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    editing: bool,
) -> InputField<'a> {
    InputField {
        label,
        value,
        placeholder,
        focused,
        editing,
        border: theme.border,
        border_focus: theme.border_focus,
        text: theme.text,
        text_dim: theme.text_dim,
    }
}

/// Rows a field needs: borders plus its lines, capped.
pub fn field_height(value: &str, multiline: bool) -> u16 {
    if !multiline {
        return 3;
    }
    let lines = value.split('\n').count().clamp(3, 8) as u16;
    lines + 2
}
