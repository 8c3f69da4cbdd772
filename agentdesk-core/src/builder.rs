//! Agent builder: owner of the draft and the save protocol.
//!
//! The builder is the only writer of the [`AgentDraft`]. Section editors
//! produce [`DraftChange`] values from a read-only view of their slice and
//! the builder applies them.
//!
//! Saving runs in two steps so a caller can show the disabled control
//! before awaiting the network:
//!
//! 1. [`AgentBuilder::begin_save`] validates name, description and persona
//!    role (in that order) and moves to [`SaveState::Saving`].
//! 2. [`AgentBuilder::finish_save`] creates the agent (or updates it if an
//!    id is already known), then uploads pending documents and registers
//!    endpoints one at a time, in list order. Only the agent call can abort
//!    the save; sub-resource failures are recorded in the [`SaveReport`]
//!    and the loop moves on.

use crate::backend::AgentBackend;
use crate::documents::DocumentPanel;
use crate::draft::{AgentDraft, DraftChange, DroppedFile};
use crate::endpoints::{EndpointEditor, ProbeOutcome};
use crate::enums::{BuilderTab, DocumentStatus};
use crate::error::{BackendError, EndpointFormError, RequiredField, SaveError, ValidationError};
use crate::persona::{update_persona, PersonaField};
use crate::wire::{AgentSummary, CreateAgentRequest, CreateEndpointRequest, DocumentUpload, UpdateAgentRequest};
use crate::AgentId;
use std::fmt;

/// State of the save control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    /// Idle again, with the message of the last failed attempt.
    Failed(String),
}

/// A sub-resource the save protocol tried to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubResource {
    Document { id: String, name: String },
    Endpoint { id: String, name: String },
}

impl fmt::Display for SubResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubResource::Document { name, .. } => write!(f, "document '{}'", name),
            SubResource::Endpoint { name, .. } => write!(f, "endpoint '{}'", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubResourceOutcome {
    pub resource: SubResource,
    pub result: Result<(), BackendError>,
}

impl SubResourceOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// What a completed save did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub agent_id: AgentId,
    /// True when this save created the agent, false when it updated it.
    pub created: bool,
    /// Every upload and registration attempted, in the order issued.
    pub outcomes: Vec<SubResourceOutcome>,
}

impl SaveReport {
    pub fn failures(&self) -> impl Iterator<Item = &SubResourceOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AgentBuilder {
    draft: AgentDraft,
    agent_id: Option<AgentId>,
    active_tab: BuilderTab,
    save_state: SaveState,
    documents: DocumentPanel,
    endpoints: EndpointEditor,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an agent that already exists on the backend.
    pub fn from_existing(agent: &AgentSummary) -> Self {
        let draft = AgentDraft {
            name: agent.name.clone(),
            description: agent.description.clone(),
            persona: agent.persona(),
            ..AgentDraft::default()
        };
        Self {
            draft,
            agent_id: Some(agent.id.clone()),
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &AgentDraft {
        &self.draft
    }

    pub fn agent_id(&self) -> Option<&AgentId> {
        self.agent_id.as_ref()
    }

    pub fn save_state(&self) -> &SaveState {
        &self.save_state
    }

    pub fn is_saving(&self) -> bool {
        self.save_state == SaveState::Saving
    }

    // ------------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------------

    pub fn active_tab(&self) -> BuilderTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: BuilderTab) {
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.active_tab = self.active_tab.previous();
    }

    // ------------------------------------------------------------------------
    // Draft edits
    // ------------------------------------------------------------------------

    pub fn apply(&mut self, change: DraftChange) {
        self.draft.apply(change);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn update_persona(&mut self, field: PersonaField, value: impl Into<String>) {
        let change = update_persona(&self.draft.persona, field, value);
        self.apply(change);
    }

    /// Stage dropped files. Returns the ids of the accepted batch, which the
    /// caller hands back to [`finish_processing`](Self::finish_processing)
    /// when the batch's completion signal fires.
    pub fn drop_files(&mut self, files: Vec<DroppedFile>) -> Option<Vec<String>> {
        let batch = self.documents.drop_files(&self.draft.documents, files)?;
        tracing::debug!(count = batch.ids.len(), "Staged dropped documents");
        self.apply(batch.change);
        Some(batch.ids)
    }

    /// Apply a batch's completion signal. Returns how many of its documents
    /// were still pending and are now ready.
    pub fn finish_processing(&mut self, batch: &[String]) -> usize {
        let pending = self
            .draft
            .documents
            .iter()
            .filter(|doc| doc.status.is_pending() && batch.contains(&doc.id))
            .count();
        let change = self.documents.finish_processing(&self.draft.documents, batch);
        self.apply(change);
        pending
    }

    pub fn remove_document(&mut self, id: &str) {
        let change = self.documents.remove(&self.draft.documents, id);
        self.apply(change);
    }

    pub fn endpoint_editor(&self) -> &EndpointEditor {
        &self.endpoints
    }

    pub fn endpoint_editor_mut(&mut self) -> &mut EndpointEditor {
        &mut self.endpoints
    }

    /// Open the endpoint form seeded from the entry with `id`.
    pub fn begin_edit_endpoint(&mut self, id: &str) -> bool {
        match self.draft.endpoint(id) {
            Some(endpoint) => {
                let endpoint = endpoint.clone();
                self.endpoints.begin_edit(&endpoint);
                true
            }
            None => false,
        }
    }

    pub fn commit_endpoint_form(&mut self) -> Result<(), EndpointFormError> {
        let change = self.endpoints.commit(&self.draft.endpoints)?;
        self.apply(change);
        Ok(())
    }

    pub fn delete_endpoint(&mut self, id: &str) {
        let change = self.endpoints.remove(&self.draft.endpoints, id);
        self.apply(change);
    }

    pub fn start_probe(&mut self, id: &str) -> bool {
        self.draft.endpoint(id).is_some() && self.endpoints.start_probe(id)
    }

    pub fn finish_probe(&mut self, id: &str) -> Option<ProbeOutcome> {
        self.endpoints.finish_probe(id)
    }

    // ------------------------------------------------------------------------
    // Save protocol
    // ------------------------------------------------------------------------

    /// Check required fields in save order, stopping at the first gap.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.draft.name.trim().is_empty() {
            return Err(ValidationError::Missing(RequiredField::AgentName));
        }
        if self.draft.description.trim().is_empty() {
            return Err(ValidationError::Missing(RequiredField::AgentDescription));
        }
        if self.draft.persona.role.trim().is_empty() {
            return Err(ValidationError::Missing(RequiredField::PersonaRole));
        }
        Ok(())
    }

    /// Validate and enter [`SaveState::Saving`]. No network access.
    pub fn begin_save(&mut self) -> Result<(), SaveError> {
        if self.is_saving() {
            return Err(SaveError::InProgress);
        }
        if let Err(err) = self.validate() {
            self.save_state = SaveState::Failed(err.to_string());
            return Err(err.into());
        }
        self.save_state = SaveState::Saving;
        Ok(())
    }

    /// Run the network half of a save started with
    /// [`begin_save`](Self::begin_save).
    pub async fn finish_save(&mut self, backend: &dyn AgentBackend) -> Result<SaveReport, SaveError> {
        if !self.is_saving() {
            return Err(SaveError::NotStarted);
        }
        let result = self.sync(backend).await;
        self.save_state = match &result {
            Ok(_) => SaveState::Idle,
            Err(err) => SaveState::Failed(err.to_string()),
        };
        result
    }

    /// Validate and save in one call.
    pub async fn save(&mut self, backend: &dyn AgentBackend) -> Result<SaveReport, SaveError> {
        self.begin_save()?;
        self.finish_save(backend).await
    }

    async fn sync(&mut self, backend: &dyn AgentBackend) -> Result<SaveReport, SaveError> {
        let (agent_id, created) = match self.agent_id.clone() {
            None => {
                let request = CreateAgentRequest::from(&self.draft);
                let id = backend.create_agent(&request).await.map_err(|err| {
                    tracing::error!(error = %err, "Agent creation failed");
                    SaveError::AgentRejected(err)
                })?;
                tracing::info!(agent_id = %id, "Agent created");
                self.agent_id = Some(id.clone());
                (id, true)
            }
            Some(id) => {
                let request = UpdateAgentRequest::from(&self.draft);
                backend.update_agent(&id, &request).await.map_err(|err| {
                    tracing::error!(agent_id = %id, error = %err, "Agent update failed");
                    SaveError::AgentRejected(err)
                })?;
                (id, false)
            }
        };

        let mut outcomes = Vec::new();
        self.upload_documents(backend, &agent_id, &mut outcomes).await;
        self.register_endpoints(backend, &agent_id, &mut outcomes).await;

        let report = SaveReport {
            agent_id,
            created,
            outcomes,
        };
        tracing::info!(
            agent_id = %report.agent_id,
            attempted = report.outcomes.len(),
            failed = report.failure_count(),
            "Agent saved"
        );
        Ok(report)
    }

    async fn upload_documents(
        &mut self,
        backend: &dyn AgentBackend,
        agent_id: &AgentId,
        outcomes: &mut Vec<SubResourceOutcome>,
    ) {
        for index in 0..self.draft.documents.len() {
            let Some(upload) = DocumentUpload::from_document(&self.draft.documents[index]) else {
                continue;
            };
            let result = backend.upload_document(agent_id, &upload).await;
            let document = &mut self.draft.documents[index];
            match &result {
                Ok(()) => {
                    document.file = None;
                    document.status = DocumentStatus::Ready;
                }
                Err(err) => {
                    tracing::warn!(agent_id = %agent_id, document = %document.name, error = %err, "Document upload failed");
                    document.status = DocumentStatus::Error;
                }
            }
            outcomes.push(SubResourceOutcome {
                resource: SubResource::Document {
                    id: document.id.clone(),
                    name: document.name.clone(),
                },
                result,
            });
        }
    }

    async fn register_endpoints(
        &mut self,
        backend: &dyn AgentBackend,
        agent_id: &AgentId,
        outcomes: &mut Vec<SubResourceOutcome>,
    ) {
        for index in 0..self.draft.endpoints.len() {
            if self.draft.endpoints[index].registered {
                continue;
            }
            let request = CreateEndpointRequest::from(&self.draft.endpoints[index]);
            let result = backend.create_endpoint(agent_id, &request).await;
            let endpoint = &mut self.draft.endpoints[index];
            match &result {
                Ok(()) => endpoint.registered = true,
                Err(err) => {
                    tracing::warn!(agent_id = %agent_id, endpoint = %endpoint.name, error = %err, "Endpoint registration failed");
                }
            }
            outcomes.push(SubResourceOutcome {
                resource: SubResource::Endpoint {
                    id: endpoint.id.clone(),
                    name: endpoint.name.clone(),
                },
                result,
            });
        }
    }
}
