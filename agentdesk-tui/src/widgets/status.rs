//! Status indicator widget.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct StatusIndicator {
    pub title: String,
    pub status: String,
    pub style: Style,
    /// Drawn dimmed, as a control that cannot be used right now.
    pub disabled: bool,
}

impl StatusIndicator {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let style = if self.disabled {
            self.style.add_modifier(Modifier::DIM)
        } else {
            self.style.add_modifier(Modifier::BOLD)
        };
        let paragraph = Paragraph::new(self.status.clone())
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(self.title.as_str())
                    .borders(Borders::ALL),
            );
        f.render_widget(paragraph, area);
    }
}
