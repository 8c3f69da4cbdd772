//! Agent list view.

use crate::state::App;
use crate::theme::agent_status_color;
use crate::views::two_column;
use crate::widgets::DetailPanel;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (list_area, detail_area) = two_column(area, 50);

    let items: Vec<ListItem> = app
        .agent_list
        .agents
        .iter()
        .map(|agent| {
            let style = Style::default().fg(agent_status_color(&agent.status, &app.theme));
            ListItem::new(Line::from(vec![
                Span::raw(agent.name.clone()),
                Span::styled(format!(" ({})", agent.status), style),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if !app.agent_list.agents.is_empty() {
        state.select(Some(app.agent_list.selected));
    }

    let title = format!("Agents ({}) • n new • e edit • d delete", app.agent_list.agents.len());
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().fg(app.theme.primary).bg(app.theme.bg_highlight))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, list_area, &mut state);

    render_detail_panel(f, app, detail_area);
}

fn render_detail_panel(f: &mut Frame<'_>, app: &App, area: Rect) {
    let mut detail = DetailPanel::new("Details", Style::default().fg(app.theme.secondary));
    if let Some(agent) = app.agent_list.selected_agent() {
        detail = detail
            .field("Agent ID", agent.id.to_string())
            .field("Name", agent.name.clone())
            .field("Status", agent.status.clone())
            .optional_field("Description", &agent.description)
            .optional_field("Role", &agent.persona_role)
            .optional_field("Tone", &agent.persona_tone)
            .field("Documents", agent.document_count.to_string())
            .field("Endpoints", agent.endpoint_count.to_string())
            .optional_field("Created", agent.created_at.as_deref().unwrap_or_default())
            .optional_field("Updated", agent.updated_at.as_deref().unwrap_or_default());
    }
    detail.render(f, area);
}
