//! The agents API as seen by the builder.

use crate::error::BackendError;
use crate::wire::{
    AgentSummary, CreateAgentRequest, CreateEndpointRequest, DocumentUpload, UpdateAgentRequest,
};
use crate::AgentId;
use async_trait::async_trait;

/// Remote collaborator the builder saves through.
///
/// Any non-2xx response must surface as [`BackendError::Rejected`].
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// `POST /api/v1/agents`, returning the assigned id.
    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<AgentId, BackendError>;

    /// `PUT /api/v1/agents/{id}`.
    async fn update_agent(
        &self,
        agent_id: &AgentId,
        request: &UpdateAgentRequest,
    ) -> Result<AgentSummary, BackendError>;

    /// `POST /api/v1/agents/{id}/documents` as multipart with a `file` part.
    async fn upload_document(
        &self,
        agent_id: &AgentId,
        upload: &DocumentUpload,
    ) -> Result<(), BackendError>;

    /// `POST /api/v1/agents/{id}/endpoints`.
    async fn create_endpoint(
        &self,
        agent_id: &AgentId,
        request: &CreateEndpointRequest,
    ) -> Result<(), BackendError>;

    async fn list_agents(&self) -> Result<Vec<AgentSummary>, BackendError>;

    async fn get_agent(&self, agent_id: &AgentId) -> Result<AgentSummary, BackendError>;

    async fn delete_agent(&self, agent_id: &AgentId) -> Result<(), BackendError>;
}
