//! Agent builder view: basic info, section tabs and the save control.

use crate::state::{App, BuilderFocus, BuilderViewState};
use crate::views::{documents, endpoints, helpers, persona};
use crate::widgets::StatusIndicator;
use agentdesk_core::{BuilderTab, SaveState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(view) = app.builder.as_ref() else {
        return;
    };
    let draft = view.builder.draft();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(helpers::field_height(&draft.description, true)),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    helpers::input_field(
        app,
        "Agent Name",
        &draft.name,
        "e.g. Support Assistant",
        view.focus == BuilderFocus::Name,
    )
    .render(f, rows[0]);
    helpers::input_field(
        app,
        "Description",
        &draft.description,
        "What does this agent do?",
        view.focus == BuilderFocus::Description,
    )
    .render(f, rows[1]);

    render_tabs(f, app, view, rows[2]);

    match view.builder.active_tab() {
        BuilderTab::Persona => persona::render(f, app, view, rows[3]),
        BuilderTab::Documents => documents::render(f, app, view, rows[3]),
        BuilderTab::Endpoints => endpoints::render(f, app, view, rows[3]),
    }

    render_save_control(f, app, view, rows[4]);
}

fn render_tabs(f: &mut Frame<'_>, app: &App, view: &BuilderViewState, area: Rect) {
    let draft = view.builder.draft();
    let titles: Vec<Line> = BuilderTab::all()
        .iter()
        .map(|tab| {
            let label = match tab {
                BuilderTab::Persona => tab.title().to_string(),
                BuilderTab::Documents => format!("{} ({})", tab.title(), draft.documents.len()),
                BuilderTab::Endpoints => format!("{} ({})", tab.title(), draft.endpoints.len()),
            };
            Line::from(label)
        })
        .collect();
    let tabs = Tabs::new(titles)
        .select(view.builder.active_tab().index())
        .style(Style::default().fg(app.theme.text_dim))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().title("Sections [Tab]").borders(Borders::ALL));
    f.render_widget(tabs, area);
}

fn render_save_control(f: &mut Frame<'_>, app: &App, view: &BuilderViewState, area: Rect) {
    let action = if view.builder.agent_id().is_some() {
        "Update Agent"
    } else {
        "Create Agent"
    };
    let (status, color) = match view.builder.save_state() {
        SaveState::Idle => (format!("{} [Ctrl+S]", action), app.theme.primary),
        SaveState::Saving => ("Saving...".to_string(), app.theme.text_dim),
        SaveState::Failed(reason) => (format!("{} [Ctrl+S] • {}", action, reason), app.theme.error),
    };
    StatusIndicator {
        title: "Save".to_string(),
        status,
        style: Style::default().fg(color),
        disabled: view.builder.is_saving(),
    }
    .render(f, area);
}
