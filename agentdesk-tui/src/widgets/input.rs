//! Labelled text field with focus and edit cursor.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct InputField<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
    pub editing: bool,
    pub border: Color,
    pub border_focus: Color,
    pub text: Color,
    pub text_dim: Color,
}

impl<'a> InputField<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = if self.value.is_empty() && !self.editing {
            vec![Line::from(Span::styled(
                self.placeholder.to_string(),
                Style::default().fg(self.text_dim),
            ))]
        } else {
            self.value
                .split('\n')
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(self.text))))
                .collect()
        };
        if self.editing {
            if let Some(last) = lines.last_mut() {
                last.spans.push(Span::styled("█", Style::default().fg(self.border_focus)));
            }
        }

        let border = if self.focused {
            self.border_focus
        } else {
            self.border
        };
        let title = if self.editing {
            format!("{} [editing]", self.label)
        } else {
            self.label.to_string()
        };
        let widget = Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(widget, area);
    }
}
