//! Persona tab: the four persona fields and a live preview.

use crate::state::{App, BuilderFocus, BuilderViewState};
use crate::views::{helpers, two_column};
use agentdesk_core::{PersonaField, ROLE_EXAMPLES, TONE_SUGGESTIONS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn placeholder(field: PersonaField) -> &'static str {
    match field {
        PersonaField::Role => "e.g. Customer Support Specialist",
        PersonaField::Tone => "e.g. friendly and professional",
        PersonaField::Instructions => "What should the agent do, and how?",
        PersonaField::Constraints => "What must the agent never do?",
    }
}

pub fn render(f: &mut Frame<'_>, app: &App, view: &BuilderViewState, area: Rect) {
    let (form_area, side_area) = two_column(area, 55);
    let persona = &view.builder.draft().persona;

    let constraints: Vec<Constraint> = PersonaField::all()
        .iter()
        .map(|field| {
            Constraint::Length(helpers::field_height(persona.get(*field), field.is_multiline()))
        })
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(form_area);

    for (field, row) in PersonaField::all().iter().zip(rows.iter()) {
        helpers::input_field(
            app,
            field.label(),
            persona.get(*field),
            placeholder(*field),
            view.focus == BuilderFocus::Persona(*field),
        )
        .render(f, *row);
    }

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(side_area);

    let preview = Paragraph::new(persona.preview())
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.text))
        .block(Block::default().title("Preview").borders(Borders::ALL));
    f.render_widget(preview, side[0]);

    let hint = Text::from(vec![
        Line::from(vec![
            Span::styled("Roles: ", Style::default().fg(app.theme.secondary)),
            Span::raw(ROLE_EXAMPLES.join(", ")),
        ]),
        Line::from(vec![
            Span::styled("Tones: ", Style::default().fg(app.theme.secondary)),
            Span::raw(TONE_SUGGESTIONS.join(", ")),
        ]),
    ]);
    let suggestions = Paragraph::new(hint)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(app.theme.text_dim))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(suggestions, side[1]);
}
