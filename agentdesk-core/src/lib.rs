//! AgentDesk Core - Agent Draft Model
//!
//! The draft an operator edits in the builder, the three section editors
//! that produce changes to it, and the save protocol that syncs it to the
//! agents API. Nothing in here touches a terminal or a socket directly;
//! the network is reached only through [`AgentBackend`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub mod backend;
pub mod builder;
pub mod documents;
pub mod draft;
pub mod endpoints;
pub mod enums;
pub mod error;
pub mod persona;
pub mod wire;

pub use backend::AgentBackend;
pub use builder::{AgentBuilder, SaveReport, SaveState, SubResource, SubResourceOutcome};
pub use documents::{
    format_file_size, mime_for_file_name, DocumentPanel, DroppedBatch, ACCEPTED_MIME_TYPES,
    DOCUMENT_PROCESSING_DELAY,
};
pub use draft::{AgentDraft, Document, DraftChange, DroppedFile, Endpoint, PendingFile, Persona};
pub use endpoints::{
    EndpointEditor, EndpointForm, EndpointFormField, FormMode, ProbeOutcome, ENDPOINT_PROBE_DELAY,
};
pub use enums::{BuilderTab, DocumentStatus, HttpMethod};
pub use error::{
    BackendError, DocumentError, EndpointFormError, RequiredField, SaveError, ValidationError,
};
pub use persona::{update_persona, PersonaField, ROLE_EXAMPLES, TONE_SUGGESTIONS};
pub use wire::{
    AgentSummary, CreateAgentRequest, CreateEndpointRequest, CreatedAgent, DocumentUpload,
    UpdateAgentRequest,
};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate an opaque client-side identifier for draft entries.
///
/// UUIDv7 keeps ids unique within a draft and sortable by creation time.
pub fn new_client_id() -> String {
    Uuid::now_v7().to_string()
}

/// Identifier assigned by the backend when an agent is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_ids_are_unique() {
        let a = new_client_id();
        let b = new_client_id();
        assert_ne!(a, b);
    }

    #[test]
    fn agent_id_serializes_as_plain_string() {
        let id = AgentId::new("agent-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"agent-42\"");
        assert_eq!(id.to_string(), "agent-42");
    }
}
