//! AgentDesk console entry point.

use agentdesk_core::{
    AgentBuilder, EndpointFormField, DOCUMENT_PROCESSING_DELAY, ENDPOINT_PROBE_DELAY,
};
use agentdesk_tui::api_client::RestClient;
use agentdesk_tui::config::TuiConfig;
use agentdesk_tui::error::TuiError;
use agentdesk_tui::events::TuiEvent;
use agentdesk_tui::keys::{map_edit_key, map_key, Action, EditAction, HELP_TEXT};
use agentdesk_tui::logging::init_tracing;
use agentdesk_tui::nav::View;
use agentdesk_tui::notifications::NotificationLevel;
use agentdesk_tui::state::{App, BuilderFocus, InputMode, Modal, ModalAction};
use agentdesk_tui::tasks::{spawn_endpoint_probe, spawn_processing_timer};
use agentdesk_tui::views::render_view;
use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

type Sender = mpsc::Sender<TuiEvent>;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    init_tracing(&config)?;
    let api = RestClient::new(&config)?;
    let mut app = App::new(config, Arc::new(api));
    tracing::info!(api = %app.config.api_base_url, "AgentDesk console starting");

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);

    spawn_input_reader(event_tx.clone());
    app.refresh_agents().await;

    let tick_rate = Duration::from_millis(app.config.refresh_interval_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        // The saving state has been drawn; run the requests now.
        if app.pending_save {
            app.run_pending_save().await;
            continue;
        }

        tokio::select! {
            _ = ticker.tick() => {}
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event, &event_tx).await? {
                    break;
                }
            }
        }
    }

    tracing::info!("AgentDesk console exiting");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: Sender) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        sender.blocking_send(TuiEvent::Input(key))
                    }
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

async fn handle_event(app: &mut App, event: TuiEvent, sender: &Sender) -> Result<bool, TuiError> {
    match event {
        TuiEvent::Input(key) => {
            if app.is_editing() {
                if let Some(edit) = map_edit_key(key) {
                    handle_edit(app, edit, sender);
                }
            } else if let Some(action) = map_key(key) {
                return handle_action(app, action, sender).await;
            }
        }
        TuiEvent::DocumentsProcessed { batch } => app.documents_processed(&batch),
        TuiEvent::ProbeFinished { endpoint_id, .. } => app.probe_finished(&endpoint_id),
        TuiEvent::Resize { .. } => {}
    }
    Ok(false)
}

fn handle_edit(app: &mut App, edit: EditAction, sender: &Sender) {
    let Some(view) = app.builder.as_mut() else {
        app.input_mode = InputMode::Normal;
        return;
    };
    match edit {
        EditAction::Insert(c) => view.insert_char(c),
        EditAction::Backspace => view.backspace(),
        EditAction::Enter if view.focus.is_multiline() => view.insert_char('\n'),
        EditAction::Enter => {
            app.input_mode = InputMode::Normal;
            if view.focus == BuilderFocus::DropPath {
                drop_documents(app, sender);
            }
        }
        EditAction::Escape => app.input_mode = InputMode::Normal,
        EditAction::Save => {
            app.input_mode = InputMode::Normal;
            app.request_save();
        }
    }
}

async fn handle_action(app: &mut App, action: Action, sender: &Sender) -> Result<bool, TuiError> {
    if let Some(modal) = app.modal.take() {
        if action == Action::Confirm {
            if let Some(ModalAction::DeleteAgent(agent_id)) = modal.on_confirm {
                app.delete_agent(&agent_id).await;
            }
        } else if action != Action::Cancel {
            app.modal = Some(modal);
        }
        return Ok(false);
    }

    match action {
        Action::Quit => return Ok(true),
        Action::NextView | Action::PrevView => {
            let forward = action == Action::NextView;
            if app.active_view == View::Builder {
                if let Some(view) = app.builder.as_mut() {
                    if forward {
                        view.next_tab();
                    } else {
                        view.previous_tab();
                    }
                }
            } else {
                let next = if forward {
                    app.active_view.next()
                } else {
                    app.active_view.previous()
                };
                app.navigate(next).await;
            }
        }
        Action::SwitchView(index) => {
            if let Some(view) = View::from_index(index) {
                app.navigate(view).await;
            }
        }
        Action::MoveDown => app.select_next(),
        Action::MoveUp => app.select_previous(),
        Action::MoveLeft | Action::MoveRight => {
            if let Some(view) = app.builder.as_mut() {
                view.cycle_method(action == Action::MoveRight);
            }
        }
        Action::Refresh => app.refresh_agents().await,
        Action::OpenHelp => app.modal = Some(Modal::info("Keybindings", HELP_TEXT)),
        Action::Save => app.request_save(),
        Action::Confirm => confirm(app).await,
        Action::Cancel => {
            if let Some(view) = app.builder.as_mut() {
                if view.builder.endpoint_editor().is_open() {
                    view.close_endpoint_form();
                }
            }
        }
        Action::NewItem => new_item(app),
        Action::EditItem => edit_item(app).await,
        Action::DeleteItem => delete_item(app),
        Action::TestEndpoint => test_endpoint(app, sender),
        Action::SubmitForm => submit_endpoint_form(app),
    }
    Ok(false)
}

async fn confirm(app: &mut App) {
    match app.active_view {
        View::Agents => edit_item(app).await,
        View::Builder => {
            let Some(view) = app.builder.as_mut() else {
                return;
            };
            if view.focus.is_text() {
                app.input_mode = InputMode::Editing;
            } else if view.focus == BuilderFocus::EndpointForm(EndpointFormField::Method) {
                view.cycle_method(true);
            }
        }
        View::Dashboard => {}
    }
}

fn new_item(app: &mut App) {
    match app.active_view {
        View::Dashboard | View::Agents => app.open_builder(AgentBuilder::new()),
        View::Builder => {
            if let Some(view) = app.builder.as_mut() {
                if matches!(view.focus, BuilderFocus::EndpointList) {
                    view.begin_add_endpoint();
                }
            }
        }
    }
}

async fn edit_item(app: &mut App) {
    match app.active_view {
        View::Agents => app.open_selected_agent().await,
        View::Builder => {
            if let Some(view) = app.builder.as_mut() {
                if view.focus == BuilderFocus::EndpointList {
                    view.begin_edit_selected_endpoint();
                }
            }
        }
        View::Dashboard => {}
    }
}

fn delete_item(app: &mut App) {
    match app.active_view {
        View::Agents => {
            if let Some(agent) = app.agent_list.selected_agent() {
                app.modal = Some(Modal::confirm_delete(agent));
            }
        }
        View::Builder => app.delete_focused_item(),
        View::Dashboard => {}
    }
}

fn drop_documents(app: &mut App, sender: &Sender) {
    let Some(view) = app.builder.as_mut() else {
        return;
    };
    match view.drop_from_path_input() {
        Ok(Some(batch)) => {
            let count = batch.len();
            spawn_processing_timer(sender.clone(), batch, DOCUMENT_PROCESSING_DELAY);
            app.notify(NotificationLevel::Info, format!("{} document(s) added", count));
        }
        Ok(None) => tracing::debug!("Drop contained no accepted documents"),
        Err(err) => {
            tracing::warn!(error = %err, "Document drop failed");
            app.notify(NotificationLevel::Error, "Failed to upload documents");
        }
    }
}

fn test_endpoint(app: &mut App, sender: &Sender) {
    let Some(view) = app.builder.as_mut() else {
        return;
    };
    if view.focus != BuilderFocus::EndpointList {
        return;
    }
    let Some(id) = view.selected_endpoint_id() else {
        return;
    };
    if view.builder.start_probe(&id) {
        spawn_endpoint_probe(sender.clone(), id, ENDPOINT_PROBE_DELAY);
        app.notify(NotificationLevel::Info, "Testing endpoint...");
    }
}

fn submit_endpoint_form(app: &mut App) {
    let Some(view) = app.builder.as_mut() else {
        return;
    };
    if !view.builder.endpoint_editor().is_open() {
        return;
    }
    match view.builder.commit_endpoint_form() {
        Ok(()) => {
            view.close_endpoint_form();
            app.notify(NotificationLevel::Success, "Endpoint saved");
        }
        Err(err) => app.notify(NotificationLevel::Error, err.to_string()),
    }
}
