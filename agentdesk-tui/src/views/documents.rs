//! Documents tab: drop zone and the staged document list.

use crate::state::{App, BuilderFocus, BuilderViewState};
use crate::theme::document_status_color;
use crate::views::helpers;
use agentdesk_core::format_file_size;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, view: &BuilderViewState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    helpers::input_field(
        app,
        "Drop files (PDF, TXT, MD, DOCX)",
        &view.drop_path,
        "Comma-separated file paths, Enter to drop",
        view.focus == BuilderFocus::DropPath,
    )
    .render(f, rows[0]);

    let documents = &view.builder.draft().documents;
    let focused = view.focus == BuilderFocus::DocumentList;
    let block = Block::default()
        .title(format!("Documents ({}) • d remove", documents.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_for(focused)));

    if documents.is_empty() {
        let empty = Paragraph::new("No documents uploaded yet.")
            .style(Style::default().fg(app.theme.text_dim))
            .block(block);
        f.render_widget(empty, rows[1]);
        return;
    }

    let items: Vec<ListItem> = documents
        .iter()
        .map(|doc| {
            ListItem::new(Line::from(vec![
                Span::styled(doc.name.clone(), Style::default().fg(app.theme.text)),
                Span::styled(
                    format!("  {}  ", format_file_size(doc.size)),
                    Style::default().fg(app.theme.text_dim),
                ),
                Span::styled(
                    doc.status.to_string(),
                    Style::default().fg(document_status_color(doc.status, &app.theme)),
                ),
                Span::styled(
                    format!("  {}", doc.uploaded_at.format("%Y-%m-%d %H:%M")),
                    Style::default().fg(app.theme.text_muted),
                ),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if focused {
        state.select(Some(view.document_selected));
    }
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(app.theme.bg_highlight))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, rows[1], &mut state);
}
