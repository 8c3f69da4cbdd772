//! Dashboard view: totals and the most recent agents.

use crate::state::App;
use crate::theme::agent_status_color;
use crate::widgets::StatusIndicator;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const RECENT_AGENTS: usize = 5;

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(rows[0]);

    let stats = app.agent_list.stats();
    let values = [
        ("Total Agents", stats.total_agents.to_string(), app.theme.primary),
        ("Active Agents", stats.active_agents.to_string(), app.theme.success),
        ("Documents", stats.documents.to_string(), app.theme.secondary),
        ("API Endpoints", stats.endpoints.to_string(), app.theme.tertiary),
    ];
    for (tile, (title, value, color)) in tiles.iter().zip(values) {
        StatusIndicator {
            title: title.to_string(),
            status: value,
            style: Style::default().fg(color),
            disabled: !app.agent_list.loaded,
        }
        .render(f, *tile);
    }

    render_recent(f, app, rows[1]);
}

fn render_recent(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default().title("Recent Agents").borders(Borders::ALL);
    if app.agent_list.agents.is_empty() {
        let message = if app.agent_list.loaded {
            "No agents yet. Press 3 to build one."
        } else {
            "Loading agents..."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(app.theme.text_dim))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .agent_list
        .agents
        .iter()
        .rev()
        .take(RECENT_AGENTS)
        .map(|agent| {
            ListItem::new(Line::from(vec![
                Span::styled(agent.name.clone(), Style::default().fg(app.theme.text)),
                Span::raw("  "),
                Span::styled(
                    agent.status.clone(),
                    Style::default().fg(agent_status_color(&agent.status, &app.theme)),
                ),
                Span::styled(
                    format!(
                        "  {} docs • {} endpoints",
                        agent.document_count, agent.endpoint_count
                    ),
                    Style::default().fg(app.theme.text_dim),
                ),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}
