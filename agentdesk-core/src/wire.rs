//! Request and response bodies of the agents API.

use crate::draft::{AgentDraft, Document, Endpoint, Persona};
use crate::enums::HttpMethod;
use crate::AgentId;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/agents`; persona fields are flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    pub name: String,
    pub description: String,
    pub persona_role: String,
    pub persona_tone: String,
    pub persona_instructions: String,
    pub persona_constraints: String,
}

impl From<&AgentDraft> for CreateAgentRequest {
    fn from(draft: &AgentDraft) -> Self {
        Self {
            name: draft.name.clone(),
            description: draft.description.clone(),
            persona_role: draft.persona.role.clone(),
            persona_tone: draft.persona.tone.clone(),
            persona_instructions: draft.persona.instructions.clone(),
            persona_constraints: draft.persona.constraints.clone(),
        }
    }
}

/// Body of `PUT /api/v1/agents/{id}`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAgentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_constraints: Option<String>,
}

impl From<&AgentDraft> for UpdateAgentRequest {
    fn from(draft: &AgentDraft) -> Self {
        let create = CreateAgentRequest::from(draft);
        Self {
            name: Some(create.name),
            description: Some(create.description),
            persona_role: Some(create.persona_role),
            persona_tone: Some(create.persona_tone),
            persona_instructions: Some(create.persona_instructions),
            persona_constraints: Some(create.persona_constraints),
        }
    }
}

/// Body of `POST /api/v1/agents/{id}/endpoints`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEndpointRequest {
    pub name: String,
    pub description: String,
    pub url: String,
    pub method: HttpMethod,
    pub request_example: String,
    pub response_example: String,
}

impl From<&Endpoint> for CreateEndpointRequest {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            name: endpoint.name.clone(),
            description: endpoint.description.clone(),
            url: endpoint.url.clone(),
            method: endpoint.method,
            request_example: endpoint.request_example.clone(),
            response_example: endpoint.response_example.clone(),
        }
    }
}

/// The `file` part of `POST /api/v1/agents/{id}/documents`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    /// Build an upload from a document that still carries its payload.
    pub fn from_document(document: &Document) -> Option<Self> {
        document.file.as_ref().map(|file| Self {
            file_name: document.name.clone(),
            mime: document.mime.clone(),
            bytes: file.bytes.clone(),
        })
    }
}

fn default_status() -> String {
    "active".to_string()
}

/// Agent as returned by the list and detail routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub id: AgentId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub persona_role: String,
    #[serde(default)]
    pub persona_tone: String,
    #[serde(default)]
    pub persona_instructions: String,
    #[serde(default)]
    pub persona_constraints: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub document_count: u32,
    #[serde(default)]
    pub endpoint_count: u32,
    /// Timestamps are kept as sent; the API emits naive ISO-8601.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl AgentSummary {
    pub fn persona(&self) -> Persona {
        Persona {
            role: self.persona_role.clone(),
            tone: self.persona_tone.clone(),
            instructions: self.persona_instructions.clone(),
            constraints: self.persona_constraints.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

/// Minimal shape of the create response: at least an `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedAgent {
    pub id: AgentId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_flattens_persona() {
        let draft = AgentDraft {
            name: "Analytics Pro Agent".to_string(),
            description: "Explains dashboards".to_string(),
            persona: Persona {
                role: "Product Expert".to_string(),
                tone: "friendly".to_string(),
                instructions: "Be concise".to_string(),
                constraints: "No pricing".to_string(),
            },
            ..AgentDraft::default()
        };
        let body = serde_json::to_value(CreateAgentRequest::from(&draft)).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Analytics Pro Agent",
                "description": "Explains dashboards",
                "persona_role": "Product Expert",
                "persona_tone": "friendly",
                "persona_instructions": "Be concise",
                "persona_constraints": "No pricing",
            })
        );
    }

    #[test]
    fn endpoint_request_uses_snake_case_examples() {
        let endpoint = Endpoint {
            id: "local".to_string(),
            name: "Get User".to_string(),
            method: HttpMethod::Get,
            url: "https://api.example.com/users/{id}".to_string(),
            description: String::new(),
            request_example: "{\"id\":1}".to_string(),
            response_example: "{}".to_string(),
            headers: Default::default(),
            registered: false,
        };
        let body = serde_json::to_value(CreateEndpointRequest::from(&endpoint)).unwrap();
        assert_eq!(body["request_example"], "{\"id\":1}");
        assert_eq!(body["response_example"], "{}");
        assert_eq!(body["method"], "GET");
        assert!(body.get("id").is_none());
        assert!(body.get("requestExample").is_none());
    }

    #[test]
    fn update_request_omits_unset_fields() {
        let body = serde_json::to_value(UpdateAgentRequest {
            persona_tone: Some("formal".to_string()),
            ..UpdateAgentRequest::default()
        })
        .unwrap();
        assert_eq!(body, json!({ "persona_tone": "formal" }));
    }

    #[test]
    fn summary_tolerates_missing_optional_fields() {
        let summary: AgentSummary = serde_json::from_value(json!({
            "id": "7f0c",
            "name": "CRM Support Agent",
            "document_count": 8,
            "endpoint_count": 15,
            "created_at": "2025-10-18T09:30:00.000001"
        }))
        .unwrap();
        assert_eq!(summary.id.as_str(), "7f0c");
        assert!(summary.is_active());
        assert_eq!(summary.endpoint_count, 15);
        assert!(summary.description.is_empty());
    }
}
