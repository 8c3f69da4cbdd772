//! Endpoints tab: registry list, detail and the add/edit form.

use crate::state::{App, BuilderFocus, BuilderViewState};
use crate::theme::method_color;
use crate::views::{helpers, two_column};
use crate::widgets::DetailPanel;
use agentdesk_core::{EndpointFormField, FormMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, view: &BuilderViewState, area: Rect) {
    let (left, right) = two_column(area, 50);
    let editor = view.builder.endpoint_editor();
    if editor.is_open() {
        render_form(f, app, view, left);
    } else {
        render_list(f, app, view, left);
    }
    render_detail(f, app, view, right);
}

fn render_list(f: &mut Frame<'_>, app: &App, view: &BuilderViewState, area: Rect) {
    let endpoints = &view.builder.draft().endpoints;
    let focused = view.focus == BuilderFocus::EndpointList;
    let block = Block::default()
        .title(format!("Endpoints ({}) • n add • e edit • d delete • t test", endpoints.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_for(focused)));

    if endpoints.is_empty() {
        let empty = Paragraph::new("No endpoints configured. Press n to add one.")
            .style(Style::default().fg(app.theme.text_dim))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let editor = view.builder.endpoint_editor();
    let items: Vec<ListItem> = endpoints
        .iter()
        .map(|endpoint| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<6}", endpoint.method.as_str()),
                    Style::default()
                        .fg(method_color(endpoint.method, &app.theme))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(endpoint.name.clone(), Style::default().fg(app.theme.text)),
                Span::styled(
                    format!("  {}", endpoint.url),
                    Style::default().fg(app.theme.text_dim),
                ),
            ];
            if editor.is_probing(&endpoint.id) {
                spans.push(Span::styled("  testing...", Style::default().fg(app.theme.warning)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    if focused {
        state.select(Some(view.endpoint_selected));
    }
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(app.theme.bg_highlight))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state);
}

fn render_form(f: &mut Frame<'_>, app: &App, view: &BuilderViewState, area: Rect) {
    let editor = view.builder.endpoint_editor();
    let form = editor.form();
    let title = match editor.mode() {
        Some(FormMode::Editing(_)) => "Edit Endpoint • s save • Esc cancel",
        _ => "Add Endpoint • s save • Esc cancel",
    };

    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.secondary));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let constraints: Vec<Constraint> = EndpointFormField::all()
        .iter()
        .map(|field| Constraint::Length(helpers::field_height(form.text(*field), field.is_multiline())))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (field, row) in EndpointFormField::all().iter().zip(rows.iter()) {
        let focused = view.focus == BuilderFocus::EndpointForm(*field);
        if *field == EndpointFormField::Method {
            let selector = Paragraph::new(Line::from(vec![
                Span::raw("< "),
                Span::styled(
                    form.method.as_str(),
                    Style::default()
                        .fg(method_color(form.method, &app.theme))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" >"),
            ]))
            .block(
                Block::default()
                    .title(format!("{} [h/l]", field.label()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border_for(focused))),
            );
            f.render_widget(selector, *row);
            continue;
        }
        let placeholder = match field {
            EndpointFormField::Url => "https://api.example.com/v1/resource",
            EndpointFormField::RequestExample | EndpointFormField::ResponseExample => "{ }",
            _ => "",
        };
        helpers::input_field(app, field.label(), form.text(*field), placeholder, focused)
            .render(f, *row);
    }
}

fn render_detail(f: &mut Frame<'_>, app: &App, view: &BuilderViewState, area: Rect) {
    let mut detail = DetailPanel::new("Endpoint", Style::default().fg(app.theme.secondary));
    let selected = view
        .selected_endpoint_id()
        .and_then(|id| view.builder.draft().endpoint(&id).cloned());
    if let Some(endpoint) = selected {
        let probe = if view.builder.endpoint_editor().is_probing(&endpoint.id) {
            "testing..."
        } else {
            "idle"
        };
        detail = detail
            .field("Name", endpoint.name.clone())
            .field("Method", endpoint.method.to_string())
            .field("URL", endpoint.url.clone())
            .optional_field("Description", &endpoint.description)
            .optional_field("Request", &endpoint.request_example)
            .optional_field("Response", &endpoint.response_example)
            .field("Registered", if endpoint.registered { "yes" } else { "no" })
            .field("Test", probe);
        for (name, value) in &endpoint.headers {
            detail = detail.field("Header", format!("{}: {}", name, value));
        }
    }
    detail.render(f, area);
}
