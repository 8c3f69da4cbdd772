//! View rendering dispatch.

pub mod agents;
pub mod builder;
pub mod dashboard;
pub mod documents;
pub mod endpoints;
pub mod helpers;
pub mod persona;

pub use helpers::{centered_rect, two_column};

use crate::keys::help_line;
use crate::nav::View;
use crate::state::App;
use crate::theme::notification_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.active_view {
        View::Dashboard => dashboard::render(f, app, layout[1]),
        View::Agents => agents::render(f, app, layout[1]),
        View::Builder => builder::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);

    if let Some(modal) = &app.modal {
        let area = centered_rect(50, 30, f.size());
        let popup = Paragraph::new(modal.message.clone())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(modal.title.as_str())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.secondary)),
            );
        f.render_widget(Clear, area);
        f.render_widget(popup, area);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        "AGENTDESK ",
        Style::default()
            .fg(app.theme.primary)
            .add_modifier(Modifier::BOLD),
    )];
    for (idx, view) in View::all().iter().enumerate() {
        let style = if *view == app.active_view {
            Style::default()
                .fg(app.theme.bg)
                .bg(app.theme.primary)
        } else {
            Style::default().fg(app.theme.text_dim)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} {} ", idx + 1, view.title()), style));
    }
    spans.push(Span::styled(
        format!("  API: {}", app.config.api_base_url),
        Style::default().fg(app.theme.text_muted),
    ));
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let now = chrono::Utc::now();
    let toast = app.notifications.last().filter(|n| n.is_visible_at(now));
    let (text, style) = if let Some(note) = toast {
        (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        )
    } else {
        (
            help_line(app.is_editing()).to_string(),
            Style::default().fg(app.theme.text_dim),
        )
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}
