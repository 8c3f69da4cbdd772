//! Application state and view state definitions.

use crate::config::TuiConfig;
use crate::nav::View;
use crate::notifications::{Notification, NotificationLevel, MAX_NOTIFICATIONS};
use crate::theme::SynthBruteTheme;
use agentdesk_core::{
    AgentBackend, AgentBuilder, AgentId, AgentSummary, BuilderTab, DocumentError, DroppedFile,
    EndpointFormField, PersonaField, SaveError,
};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

pub struct App {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub api: Arc<dyn AgentBackend>,
    pub active_view: View,
    pub input_mode: InputMode,

    pub agent_list: AgentListState,
    /// Open draft. Dropped when the operator navigates away from the builder.
    pub builder: Option<BuilderViewState>,
    /// A validated save waiting for the next frame to be drawn.
    pub pending_save: bool,

    pub notifications: Vec<Notification>,
    pub modal: Option<Modal>,
}

impl App {
    pub fn new(config: TuiConfig, api: Arc<dyn AgentBackend>) -> Self {
        Self {
            config,
            theme: SynthBruteTheme::synthbrute(),
            api,
            active_view: View::Dashboard,
            input_mode: InputMode::Normal,
            agent_list: AgentListState::default(),
            builder: None,
            pending_save: false,
            notifications: Vec::new(),
            modal: None,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
    }

    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Editing
    }

    /// Switch views. Leaving the builder discards its draft; entering it
    /// without a draft opens a fresh one.
    pub fn switch_view(&mut self, view: View) {
        if view == self.active_view {
            return;
        }
        if self.active_view == View::Builder && self.builder.take().is_some() {
            tracing::debug!("Discarded builder draft");
        }
        if view == View::Builder && self.builder.is_none() {
            self.builder = Some(BuilderViewState::new(AgentBuilder::new()));
        }
        self.input_mode = InputMode::Normal;
        self.active_view = view;
    }

    /// Switch views and reload the agent list if the target shows it.
    pub async fn navigate(&mut self, view: View) {
        self.switch_view(view);
        if view.needs_agents() {
            self.refresh_agents().await;
        }
    }

    /// Open the builder on a given draft, replacing any open one.
    pub fn open_builder(&mut self, builder: AgentBuilder) {
        self.builder = Some(BuilderViewState::new(builder));
        self.pending_save = false;
        self.input_mode = InputMode::Normal;
        self.active_view = View::Builder;
    }

    pub fn select_next(&mut self) {
        match self.active_view {
            View::Dashboard | View::Agents => self.agent_list.select_next(),
            View::Builder => {
                if let Some(view) = self.builder.as_mut() {
                    view.focus_next();
                }
            }
        }
    }

    pub fn select_previous(&mut self) {
        match self.active_view {
            View::Dashboard | View::Agents => self.agent_list.select_previous(),
            View::Builder => {
                if let Some(view) = self.builder.as_mut() {
                    view.focus_previous();
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Agent list
    // ------------------------------------------------------------------------

    pub async fn refresh_agents(&mut self) {
        if !self.active_view.needs_agents() {
            return;
        }
        match self.api.list_agents().await {
            Ok(agents) => self.agent_list.set_agents(agents),
            Err(err) => {
                tracing::error!(error = %err, "Agent list refresh failed");
                self.notify(NotificationLevel::Error, format!("Failed to load agents: {}", err));
            }
        }
    }

    /// Load the selected agent and open it in the builder.
    pub async fn open_selected_agent(&mut self) {
        let Some(agent_id) = self.agent_list.selected_agent().map(|a| a.id.clone()) else {
            return;
        };
        match self.api.get_agent(&agent_id).await {
            Ok(agent) => self.open_builder(AgentBuilder::from_existing(&agent)),
            Err(err) => {
                tracing::error!(agent_id = %agent_id, error = %err, "Agent load failed");
                self.notify(NotificationLevel::Error, format!("Failed to load agent: {}", err));
            }
        }
    }

    pub async fn delete_agent(&mut self, agent_id: &AgentId) {
        match self.api.delete_agent(agent_id).await {
            Ok(()) => {
                tracing::info!(agent_id = %agent_id, "Agent deleted");
                self.notify(NotificationLevel::Success, "Agent deleted");
                self.refresh_agents().await;
            }
            Err(err) => {
                tracing::error!(agent_id = %agent_id, error = %err, "Agent delete failed");
                self.notify(NotificationLevel::Error, format!("Failed to delete agent: {}", err));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Builder
    // ------------------------------------------------------------------------

    /// Remove the focused document or endpoint.
    pub fn delete_focused_item(&mut self) {
        let Some(view) = self.builder.as_mut() else {
            return;
        };
        let removed = match view.focus {
            BuilderFocus::DocumentList => {
                view.remove_selected_document().then_some("Document deleted")
            }
            BuilderFocus::EndpointList => {
                view.delete_selected_endpoint().then_some("Endpoint deleted")
            }
            _ => None,
        };
        if let Some(message) = removed {
            self.notify(NotificationLevel::Success, message);
        }
    }

    /// Completion signal of a dropped batch.
    pub fn documents_processed(&mut self, batch: &[String]) {
        let Some(view) = self.builder.as_mut() else {
            return;
        };
        let ready = view.builder.finish_processing(batch);
        if ready > 0 {
            self.notify(
                NotificationLevel::Success,
                format!("{} document(s) uploaded successfully", ready),
            );
        }
    }

    /// Completion signal of a reachability probe. Probes of endpoints deleted
    /// in the meantime report nothing.
    pub fn probe_finished(&mut self, endpoint_id: &str) {
        let finished = self
            .builder
            .as_mut()
            .and_then(|view| view.builder.finish_probe(endpoint_id));
        if finished.is_some() {
            self.notify(NotificationLevel::Success, "Endpoint test successful");
        }
    }

    /// First half of a save: validate and mark the control as saving. The
    /// requests run in [`run_pending_save`](Self::run_pending_save) once the
    /// disabled control has been drawn.
    pub fn request_save(&mut self) {
        let Some(view) = self.builder.as_mut() else {
            return;
        };
        match view.builder.begin_save() {
            Ok(()) => self.pending_save = true,
            Err(SaveError::InProgress) => {}
            Err(err) => self.notify(NotificationLevel::Error, err.to_string()),
        }
    }

    /// Run the save requested by [`request_save`](Self::request_save), if any.
    ///
    /// Success discards the draft and moves to a refreshed Agents view.
    /// Failure keeps the builder and its draft.
    pub async fn run_pending_save(&mut self) {
        if !std::mem::take(&mut self.pending_save) {
            return;
        }
        let Some(view) = self.builder.as_mut() else {
            return;
        };
        let result = view.builder.finish_save(self.api.as_ref()).await;
        match result {
            Ok(report) => {
                if report.failure_count() > 0 {
                    let failed: Vec<String> = report
                        .failures()
                        .map(|outcome| outcome.resource.to_string())
                        .collect();
                    self.notify(
                        NotificationLevel::Warning,
                        format!("Some items failed to sync: {}", failed.join(", ")),
                    );
                }
                let message = if report.created {
                    "Agent created successfully"
                } else {
                    "Agent updated successfully"
                };
                self.notify(NotificationLevel::Success, message);
                self.builder = None;
                self.navigate(View::Agents).await;
            }
            Err(SaveError::NotStarted) => {}
            Err(err) => {
                tracing::error!(error = %err, "Save failed");
                self.notify(NotificationLevel::Error, "Failed to save agent");
            }
        }
    }
}

// ============================================================================
// MODALS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    DeleteAgent(AgentId),
}

#[derive(Debug, Clone)]
pub struct Modal {
    pub title: String,
    pub message: String,
    /// Runs on Enter. Informational modals have none.
    pub on_confirm: Option<ModalAction>,
}

impl Modal {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            on_confirm: None,
        }
    }

    pub fn confirm_delete(agent: &AgentSummary) -> Self {
        Self {
            title: "Delete agent".to_string(),
            message: format!(
                "Delete \"{}\"? This cannot be undone.\n\nEnter confirm • Esc cancel",
                agent.name
            ),
            on_confirm: Some(ModalAction::DeleteAgent(agent.id.clone())),
        }
    }
}

// ============================================================================
// AGENT LIST
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct AgentListState {
    pub agents: Vec<AgentSummary>,
    pub selected: usize,
    pub loaded: bool,
}

impl AgentListState {
    pub fn set_agents(&mut self, agents: Vec<AgentSummary>) {
        self.agents = agents;
        self.loaded = true;
        self.clamp_selection();
    }

    pub fn selected_agent(&self) -> Option<&AgentSummary> {
        self.agents.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.agents.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.agents.len().saturating_sub(1));
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_agents(&self.agents)
    }
}

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_agents: usize,
    pub active_agents: usize,
    pub documents: u64,
    pub endpoints: u64,
}

impl DashboardStats {
    pub fn from_agents(agents: &[AgentSummary]) -> Self {
        Self {
            total_agents: agents.len(),
            active_agents: agents.iter().filter(|a| a.is_active()).count(),
            documents: agents.iter().map(|a| u64::from(a.document_count)).sum(),
            endpoints: agents.iter().map(|a| u64::from(a.endpoint_count)).sum(),
        }
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Focusable element of the builder screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderFocus {
    Name,
    Description,
    Persona(PersonaField),
    DropPath,
    DocumentList,
    EndpointList,
    EndpointForm(EndpointFormField),
}

impl BuilderFocus {
    /// Whether Enter starts text entry on this element.
    pub fn is_text(&self) -> bool {
        match self {
            BuilderFocus::Name
            | BuilderFocus::Description
            | BuilderFocus::Persona(_)
            | BuilderFocus::DropPath => true,
            BuilderFocus::EndpointForm(field) => *field != EndpointFormField::Method,
            BuilderFocus::DocumentList | BuilderFocus::EndpointList => false,
        }
    }

    /// Multi-line fields take Enter as a newline and commit on Esc.
    pub fn is_multiline(&self) -> bool {
        match self {
            BuilderFocus::Description => true,
            BuilderFocus::Persona(field) => field.is_multiline(),
            BuilderFocus::EndpointForm(field) => field.is_multiline(),
            _ => false,
        }
    }
}

pub struct BuilderViewState {
    pub builder: AgentBuilder,
    pub focus: BuilderFocus,
    /// Comma-separated paths typed into the drop zone.
    pub drop_path: String,
    pub document_selected: usize,
    pub endpoint_selected: usize,
}

impl BuilderViewState {
    pub fn new(builder: AgentBuilder) -> Self {
        Self {
            builder,
            focus: BuilderFocus::Name,
            drop_path: String::new(),
            document_selected: 0,
            endpoint_selected: 0,
        }
    }

    /// Focus order for the active tab: basic info, then the tab body.
    pub fn focus_order(&self) -> Vec<BuilderFocus> {
        let mut order = vec![BuilderFocus::Name, BuilderFocus::Description];
        match self.builder.active_tab() {
            BuilderTab::Persona => {
                order.extend(PersonaField::all().iter().copied().map(BuilderFocus::Persona));
            }
            BuilderTab::Documents => {
                order.push(BuilderFocus::DropPath);
                order.push(BuilderFocus::DocumentList);
            }
            BuilderTab::Endpoints => {
                if self.builder.endpoint_editor().is_open() {
                    order.extend(
                        EndpointFormField::all()
                            .iter()
                            .copied()
                            .map(BuilderFocus::EndpointForm),
                    );
                } else {
                    order.push(BuilderFocus::EndpointList);
                }
            }
        }
        order
    }

    fn focus_position(&self) -> Option<usize> {
        self.focus_order().iter().position(|f| *f == self.focus)
    }

    /// Move down. Lists consume the move until their last entry.
    pub fn focus_next(&mut self) {
        match self.focus {
            BuilderFocus::DocumentList => {
                if self.document_selected + 1 < self.builder.draft().documents.len() {
                    self.document_selected += 1;
                }
                return;
            }
            BuilderFocus::EndpointList => {
                if self.endpoint_selected + 1 < self.builder.draft().endpoints.len() {
                    self.endpoint_selected += 1;
                }
                return;
            }
            _ => {}
        }
        let order = self.focus_order();
        if let Some(pos) = self.focus_position() {
            if let Some(next) = order.get(pos + 1) {
                self.focus = *next;
            }
        }
    }

    /// Move up. Lists consume the move until their first entry.
    pub fn focus_previous(&mut self) {
        match self.focus {
            BuilderFocus::DocumentList if self.document_selected > 0 => {
                self.document_selected -= 1;
                return;
            }
            BuilderFocus::EndpointList if self.endpoint_selected > 0 => {
                self.endpoint_selected -= 1;
                return;
            }
            _ => {}
        }
        let order = self.focus_order();
        if let Some(pos) = self.focus_position() {
            if pos > 0 {
                self.focus = order[pos - 1];
            }
        }
    }

    /// Reset focus to the first element of the tab body if it fell out of
    /// the current order.
    pub fn sync_focus(&mut self) {
        if self.focus_position().is_none() {
            let order = self.focus_order();
            self.focus = order.get(2).copied().unwrap_or(BuilderFocus::Name);
        }
        let documents = self.builder.draft().documents.len();
        let endpoints = self.builder.draft().endpoints.len();
        self.document_selected = self.document_selected.min(documents.saturating_sub(1));
        self.endpoint_selected = self.endpoint_selected.min(endpoints.saturating_sub(1));
    }

    pub fn next_tab(&mut self) {
        self.builder.next_tab();
        self.sync_focus();
    }

    pub fn previous_tab(&mut self) {
        self.builder.previous_tab();
        self.sync_focus();
    }

    /// Current text of the focused field, if it is a text field.
    pub fn focused_text(&self) -> Option<String> {
        let draft = self.builder.draft();
        let text = match self.focus {
            BuilderFocus::Name => draft.name.clone(),
            BuilderFocus::Description => draft.description.clone(),
            BuilderFocus::Persona(field) => draft.persona.get(field).to_string(),
            BuilderFocus::DropPath => self.drop_path.clone(),
            BuilderFocus::EndpointForm(field) if field != EndpointFormField::Method => {
                self.builder.endpoint_editor().form().text(field).to_string()
            }
            _ => return None,
        };
        Some(text)
    }

    /// Apply `edit` to the focused field. Each call is one change handed
    /// to the builder, so previews follow every keystroke.
    pub fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(mut text) = self.focused_text() else {
            return;
        };
        edit(&mut text);
        match self.focus {
            BuilderFocus::Name => self.builder.set_name(text),
            BuilderFocus::Description => self.builder.set_description(text),
            BuilderFocus::Persona(field) => self.builder.update_persona(field, text),
            BuilderFocus::DropPath => self.drop_path = text,
            BuilderFocus::EndpointForm(field) => {
                self.builder.endpoint_editor_mut().form_mut().set_text(field, text)
            }
            BuilderFocus::DocumentList | BuilderFocus::EndpointList => {}
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.edit_focused(|text| text.push(c));
    }

    pub fn backspace(&mut self) {
        self.edit_focused(|text| {
            text.pop();
        });
    }

    /// Cycle the method selector when it has focus.
    pub fn cycle_method(&mut self, forward: bool) {
        if self.focus != BuilderFocus::EndpointForm(EndpointFormField::Method) {
            return;
        }
        let form = self.builder.endpoint_editor_mut().form_mut();
        form.method = if forward {
            form.method.next()
        } else {
            form.method.previous()
        };
    }

    pub fn selected_document_id(&self) -> Option<String> {
        self.builder
            .draft()
            .documents
            .get(self.document_selected)
            .map(|d| d.id.clone())
    }

    pub fn selected_endpoint_id(&self) -> Option<String> {
        self.builder
            .draft()
            .endpoints
            .get(self.endpoint_selected)
            .map(|e| e.id.clone())
    }

    /// Read every path in the drop zone and drop the files as one batch.
    ///
    /// Any unreadable path fails the whole drop. Returns the accepted batch
    /// ids, or `None` when no file had an accepted type.
    pub fn drop_from_path_input(&mut self) -> Result<Option<Vec<String>>, DocumentError> {
        let files = self
            .drop_path
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| DroppedFile::from_path(Path::new(p)))
            .collect::<Result<Vec<_>, _>>()?;
        self.drop_path.clear();
        if files.is_empty() {
            return Ok(None);
        }
        Ok(self.builder.drop_files(files))
    }

    pub fn remove_selected_document(&mut self) -> bool {
        let Some(id) = self.selected_document_id() else {
            return false;
        };
        self.builder.remove_document(&id);
        self.sync_focus();
        true
    }

    pub fn begin_add_endpoint(&mut self) {
        self.builder.endpoint_editor_mut().begin_add();
        self.focus = BuilderFocus::EndpointForm(EndpointFormField::Name);
    }

    pub fn begin_edit_selected_endpoint(&mut self) -> bool {
        let Some(id) = self.selected_endpoint_id() else {
            return false;
        };
        if self.builder.begin_edit_endpoint(&id) {
            self.focus = BuilderFocus::EndpointForm(EndpointFormField::Name);
            true
        } else {
            false
        }
    }

    pub fn close_endpoint_form(&mut self) {
        self.builder.endpoint_editor_mut().cancel();
        self.focus = BuilderFocus::EndpointList;
        self.sync_focus();
    }

    pub fn delete_selected_endpoint(&mut self) -> bool {
        let Some(id) = self.selected_endpoint_id() else {
            return false;
        };
        self.builder.delete_endpoint(&id);
        self.sync_focus();
        true
    }
}
