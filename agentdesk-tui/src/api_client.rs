//! REST client for the agents API.

use crate::config::TuiConfig;
use agentdesk_core::{
    AgentBackend, AgentId, AgentSummary, BackendError, CreateAgentRequest, CreateEndpointRequest,
    CreatedAgent, DocumentUpload, UpdateAgentRequest,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl From<ApiClientError> for BackendError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Rejected { status, message } => BackendError::Rejected { status, message },
            ApiClientError::Http(err) if err.is_decode() => BackendError::InvalidResponse(err.to_string()),
            ApiClientError::Http(err) => BackendError::Transport(err.to_string()),
            ApiClientError::Serde(err) => BackendError::InvalidResponse(err.to_string()),
            ApiClientError::InvalidResponse(message) => BackendError::InvalidResponse(message),
        }
    }
}

/// Error body emitted by the API (`{"detail": ...}`).
#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    detail: serde_json::Value,
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn fetch_agents(&self) -> Result<Vec<AgentSummary>, ApiClientError> {
        let response = self.client.get(self.url("/api/v1/agents")).send().await?;
        self.parse_response(response).await
    }

    pub async fn fetch_agent(&self, agent_id: &AgentId) -> Result<AgentSummary, ApiClientError> {
        let path = format!("/api/v1/agents/{}", agent_id);
        let response = self.client.get(self.url(&path)).send().await?;
        self.parse_response(response).await
    }

    pub async fn post_agent(&self, req: &CreateAgentRequest) -> Result<AgentId, ApiClientError> {
        let created: CreatedAgent = self.post_json("/api/v1/agents", req).await?;
        Ok(created.id)
    }

    pub async fn put_agent(
        &self,
        agent_id: &AgentId,
        req: &UpdateAgentRequest,
    ) -> Result<AgentSummary, ApiClientError> {
        let path = format!("/api/v1/agents/{}", agent_id);
        let response = self.client.put(self.url(&path)).json(req).send().await?;
        self.parse_response(response).await
    }

    pub async fn remove_agent(&self, agent_id: &AgentId) -> Result<(), ApiClientError> {
        let path = format!("/api/v1/agents/{}", agent_id);
        let response = self.client.delete(self.url(&path)).send().await?;
        self.expect_success(response).await
    }

    /// Upload one document using multipart/form-data with a `file` part.
    pub async fn post_document(
        &self,
        agent_id: &AgentId,
        upload: &DocumentUpload,
    ) -> Result<(), ApiClientError> {
        let path = format!("/api/v1/agents/{}/documents", agent_id);
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime)?;
        let form = Form::new().part("file", part);
        let response = self.client.post(self.url(&path)).multipart(form).send().await?;
        self.expect_success(response).await
    }

    pub async fn post_endpoint(
        &self,
        agent_id: &AgentId,
        req: &CreateEndpointRequest,
    ) -> Result<(), ApiClientError> {
        let path = format!("/api/v1/agents/{}/endpoints", agent_id);
        let response = self.client.post(self.url(&path)).json(req).send().await?;
        self.expect_success(response).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        self.parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str::<T>(&text)?)
        } else {
            Err(rejection(status, response.text().await?))
        }
    }

    async fn expect_success(&self, response: reqwest::Response) -> Result<(), ApiClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(rejection(status, response.text().await?))
        }
    }
}

fn rejection(status: reqwest::StatusCode, text: String) -> ApiClientError {
    tracing::debug!(status = status.as_u16(), body = %text, "API request rejected");
    ApiClientError::Rejected {
        status: status.as_u16(),
        message: error_message(&text),
    }
}

/// Pull a readable message out of an error body, falling back to the raw text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ServerErrorBody>(body) {
        Ok(ServerErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ServerErrorBody { detail }) => detail.to_string(),
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl AgentBackend for RestClient {
    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<AgentId, BackendError> {
        Ok(self.post_agent(request).await?)
    }

    async fn update_agent(
        &self,
        agent_id: &AgentId,
        request: &UpdateAgentRequest,
    ) -> Result<AgentSummary, BackendError> {
        Ok(self.put_agent(agent_id, request).await?)
    }

    async fn upload_document(
        &self,
        agent_id: &AgentId,
        upload: &DocumentUpload,
    ) -> Result<(), BackendError> {
        Ok(self.post_document(agent_id, upload).await?)
    }

    async fn create_endpoint(
        &self,
        agent_id: &AgentId,
        request: &CreateEndpointRequest,
    ) -> Result<(), BackendError> {
        Ok(self.post_endpoint(agent_id, request).await?)
    }

    async fn list_agents(&self) -> Result<Vec<AgentSummary>, BackendError> {
        Ok(self.fetch_agents().await?)
    }

    async fn get_agent(&self, agent_id: &AgentId) -> Result<AgentSummary, BackendError> {
        Ok(self.fetch_agent(agent_id).await?)
    }

    async fn delete_agent(&self, agent_id: &AgentId) -> Result<(), BackendError> {
        Ok(self.remove_agent(agent_id).await?)
    }
}
