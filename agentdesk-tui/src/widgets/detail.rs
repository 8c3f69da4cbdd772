//! Detail panel widget for showing field/value pairs.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct DetailPanel<'a> {
    pub title: &'a str,
    pub fields: Vec<(&'a str, String)>,
    pub style: Style,
    /// Shown when there are no fields.
    pub placeholder: &'a str,
}

impl<'a> DetailPanel<'a> {
    pub fn new(title: &'a str, style: Style) -> Self {
        Self {
            title,
            fields: Vec::new(),
            style,
            placeholder: "Nothing selected",
        }
    }

    pub fn field(mut self, label: &'a str, value: impl Into<String>) -> Self {
        self.fields.push((label, value.into()));
        self
    }

    /// Add a field only when it has content.
    pub fn optional_field(self, label: &'a str, value: &str) -> Self {
        if value.trim().is_empty() {
            self
        } else {
            self.field(label, value)
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line> = if self.fields.is_empty() {
            vec![Line::from(self.placeholder)]
        } else {
            self.fields
                .iter()
                .flat_map(|(label, value)| {
                    let mut value_lines = value.lines();
                    let first = value_lines.next().unwrap_or_default().to_string();
                    let mut lines = vec![Line::from(vec![
                        Span::styled(format!("{}: ", label), self.style),
                        Span::raw(first),
                    ])];
                    lines.extend(value_lines.map(|l| Line::from(format!("  {}", l))));
                    lines
                })
                .collect()
        };

        let widget = Paragraph::new(Text::from(lines))
            .block(Block::default().title(self.title).borders(Borders::ALL))
            .wrap(Wrap { trim: false });

        f.render_widget(widget, area);
    }
}
