use agentdesk_core::{
    AgentBackend, AgentBuilder, AgentId, AgentSummary, BackendError, CreateAgentRequest,
    CreateEndpointRequest, DocumentStatus, DocumentUpload, DroppedFile, PersonaField,
    RequiredField, SaveError, SaveState, SubResource, UpdateAgentRequest, ValidationError,
};
use async_trait::async_trait;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    CreateAgent(CreateAgentRequest),
    UpdateAgent(String),
    UploadDocument { agent_id: String, file_name: String },
    CreateEndpoint { agent_id: String, request: CreateEndpointRequest },
}

/// Records every call; uploads/registrations listed by 1-based position fail.
#[derive(Default)]
struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    reject_create: bool,
    failing_uploads: HashSet<usize>,
    failing_endpoints: HashSet<usize>,
}

impl RecordingBackend {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> usize {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        calls.len()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }
}

fn rejected() -> BackendError {
    BackendError::Rejected {
        status: 500,
        message: "boom".to_string(),
    }
}

#[async_trait]
impl AgentBackend for RecordingBackend {
    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<AgentId, BackendError> {
        self.record(Call::CreateAgent(request.clone()));
        if self.reject_create {
            return Err(rejected());
        }
        Ok(AgentId::new("agent-1"))
    }

    async fn update_agent(
        &self,
        agent_id: &AgentId,
        request: &UpdateAgentRequest,
    ) -> Result<AgentSummary, BackendError> {
        self.record(Call::UpdateAgent(agent_id.to_string()));
        Ok(AgentSummary {
            id: agent_id.clone(),
            name: request.name.clone().unwrap_or_default(),
            description: request.description.clone().unwrap_or_default(),
            persona_role: String::new(),
            persona_tone: String::new(),
            persona_instructions: String::new(),
            persona_constraints: String::new(),
            status: "active".to_string(),
            document_count: 0,
            endpoint_count: 0,
            created_at: None,
            updated_at: None,
        })
    }

    async fn upload_document(
        &self,
        agent_id: &AgentId,
        upload: &DocumentUpload,
    ) -> Result<(), BackendError> {
        self.record(Call::UploadDocument {
            agent_id: agent_id.to_string(),
            file_name: upload.file_name.clone(),
        });
        let position = self.count(|c| matches!(c, Call::UploadDocument { .. }));
        if self.failing_uploads.contains(&position) {
            return Err(rejected());
        }
        Ok(())
    }

    async fn create_endpoint(
        &self,
        agent_id: &AgentId,
        request: &CreateEndpointRequest,
    ) -> Result<(), BackendError> {
        self.record(Call::CreateEndpoint {
            agent_id: agent_id.to_string(),
            request: request.clone(),
        });
        let position = self.count(|c| matches!(c, Call::CreateEndpoint { .. }));
        if self.failing_endpoints.contains(&position) {
            return Err(BackendError::Transport("connection reset".to_string()));
        }
        Ok(())
    }

    async fn list_agents(&self) -> Result<Vec<AgentSummary>, BackendError> {
        Ok(Vec::new())
    }

    async fn get_agent(&self, _agent_id: &AgentId) -> Result<AgentSummary, BackendError> {
        Err(BackendError::Rejected {
            status: 404,
            message: "Agent not found".to_string(),
        })
    }

    async fn delete_agent(&self, _agent_id: &AgentId) -> Result<(), BackendError> {
        Ok(())
    }
}

fn valid_builder() -> AgentBuilder {
    let mut builder = AgentBuilder::new();
    builder.set_name("Analytics Pro Agent");
    builder.set_description("Helps customers understand analytics features");
    builder.update_persona(PersonaField::Role, "Product Expert");
    builder
}

fn text_file(name: &str) -> DroppedFile {
    DroppedFile {
        name: name.to_string(),
        mime: "text/plain".to_string(),
        bytes: name.as_bytes().to_vec(),
    }
}

fn add_endpoint(builder: &mut AgentBuilder, name: &str) {
    let editor = builder.endpoint_editor_mut();
    editor.begin_add();
    editor.form_mut().name = name.to_string();
    editor.form_mut().url = format!("https://api.example.com/{}", name);
    editor.form_mut().request_example = "{\"q\":1}".to_string();
    builder.commit_endpoint_form().unwrap();
}

#[tokio::test]
async fn empty_name_never_reaches_the_network() {
    let backend = RecordingBackend::default();
    let mut builder = valid_builder();
    builder.set_name("");

    let err = builder.save(&backend).await.unwrap_err();
    assert_eq!(
        err,
        SaveError::Validation(ValidationError::Missing(RequiredField::AgentName))
    );
    assert!(backend.calls().is_empty());
    assert!(matches!(builder.save_state(), SaveState::Failed(_)));
}

#[tokio::test]
async fn validation_checks_fields_in_order() {
    let backend = RecordingBackend::default();

    let mut builder = AgentBuilder::new();
    builder.set_name("Agent");
    let err = builder.save(&backend).await.unwrap_err();
    assert_eq!(
        err,
        SaveError::Validation(ValidationError::Missing(RequiredField::AgentDescription))
    );

    builder.set_description("Does things");
    let err = builder.save(&backend).await.unwrap_err();
    assert_eq!(
        err,
        SaveError::Validation(ValidationError::Missing(RequiredField::PersonaRole))
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn bare_agent_issues_exactly_one_create() {
    let backend = RecordingBackend::default();
    let mut builder = valid_builder();

    let report = builder.save(&backend).await.unwrap();

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    let Call::CreateAgent(request) = &calls[0] else {
        panic!("expected create call, got {:?}", calls[0]);
    };
    assert_eq!(request.name, "Analytics Pro Agent");
    assert_eq!(request.persona_role, "Product Expert");
    assert!(report.created);
    assert!(report.outcomes.is_empty());
    assert_eq!(builder.agent_id(), Some(&AgentId::new("agent-1")));
    assert_eq!(builder.save_state(), &SaveState::Idle);
}

#[tokio::test]
async fn failed_upload_does_not_stop_the_batch() {
    let backend = RecordingBackend {
        failing_uploads: HashSet::from([2]),
        ..RecordingBackend::default()
    };
    let mut builder = valid_builder();
    builder
        .drop_files(vec![text_file("a.txt"), text_file("b.txt"), text_file("c.txt")])
        .unwrap();
    add_endpoint(&mut builder, "users");
    add_endpoint(&mut builder, "orders");

    let report = builder.save(&backend).await.unwrap();

    let calls = backend.calls();
    assert_eq!(calls.len(), 1 + 3 + 2);
    assert!(matches!(calls[0], Call::CreateAgent(_)));
    let uploaded: Vec<_> = calls[1..4]
        .iter()
        .map(|c| match c {
            Call::UploadDocument { agent_id, file_name } => {
                assert_eq!(agent_id, "agent-1");
                file_name.clone()
            }
            other => panic!("expected upload, got {:?}", other),
        })
        .collect();
    assert_eq!(uploaded, ["a.txt", "b.txt", "c.txt"]);
    let registered: Vec<_> = calls[4..]
        .iter()
        .map(|c| match c {
            Call::CreateEndpoint { request, .. } => request.name.clone(),
            other => panic!("expected endpoint, got {:?}", other),
        })
        .collect();
    assert_eq!(registered, ["users", "orders"]);

    assert_eq!(report.outcomes.len(), 5);
    assert_eq!(report.failure_count(), 1);
    let failed = report.failures().next().unwrap();
    assert!(matches!(&failed.resource, SubResource::Document { name, .. } if name == "b.txt"));

    let docs = &builder.draft().documents;
    assert_eq!(docs[0].status, DocumentStatus::Ready);
    assert!(!docs[0].has_pending_upload());
    assert_eq!(docs[1].status, DocumentStatus::Error);
    assert!(docs[1].has_pending_upload());
    assert!(builder.draft().endpoints.iter().all(|e| e.registered));
    assert_eq!(builder.save_state(), &SaveState::Idle);
}

#[tokio::test]
async fn rejected_create_aborts_everything() {
    let backend = RecordingBackend {
        reject_create: true,
        ..RecordingBackend::default()
    };
    let mut builder = valid_builder();
    builder.drop_files(vec![text_file("a.txt")]).unwrap();
    add_endpoint(&mut builder, "users");
    let before = builder.draft().clone();

    let err = builder.save(&backend).await.unwrap_err();

    assert!(matches!(err, SaveError::AgentRejected(_)));
    assert_eq!(backend.calls().len(), 1);
    assert_eq!(builder.draft(), &before);
    assert!(builder.agent_id().is_none());
    assert!(matches!(builder.save_state(), SaveState::Failed(_)));
}

#[tokio::test]
async fn second_save_updates_and_only_retries_unsent_items() {
    let backend = RecordingBackend {
        failing_uploads: HashSet::from([1]),
        failing_endpoints: HashSet::from([2]),
        ..RecordingBackend::default()
    };
    let mut builder = valid_builder();
    builder
        .drop_files(vec![text_file("a.txt"), text_file("b.txt")])
        .unwrap();
    add_endpoint(&mut builder, "users");
    add_endpoint(&mut builder, "orders");
    builder.save(&backend).await.unwrap();

    builder.update_persona(PersonaField::Tone, "friendly");
    let report = builder.save(&backend).await.unwrap();

    assert!(!report.created);
    let calls = backend.calls();
    let retried = &calls[5..];
    assert_eq!(retried[0], Call::UpdateAgent("agent-1".to_string()));
    assert!(matches!(&retried[1], Call::UploadDocument { file_name, .. } if file_name == "a.txt"));
    assert!(matches!(&retried[2], Call::CreateEndpoint { request, .. } if request.name == "orders"));
    assert_eq!(retried.len(), 3);
}

#[tokio::test]
async fn begin_save_blocks_duplicate_submission() {
    let backend = RecordingBackend::default();
    let mut builder = valid_builder();

    builder.begin_save().unwrap();
    assert!(builder.is_saving());
    assert_eq!(builder.begin_save(), Err(SaveError::InProgress));
    assert_eq!(builder.save(&backend).await.unwrap_err(), SaveError::InProgress);

    builder.finish_save(&backend).await.unwrap();
    assert_eq!(backend.count(|c| matches!(c, Call::CreateAgent(_))), 1);
    assert_eq!(
        builder.finish_save(&backend).await.unwrap_err(),
        SaveError::NotStarted
    );
}

#[tokio::test]
async fn existing_agent_is_updated_not_created() {
    let backend = RecordingBackend::default();
    let summary = backend.update_agent(&AgentId::new("a-9"), &UpdateAgentRequest {
        name: Some("Existing".to_string()),
        description: Some("Loaded".to_string()),
        ..UpdateAgentRequest::default()
    })
    .await
    .unwrap();
    let mut builder = AgentBuilder::from_existing(&summary);
    builder.update_persona(PersonaField::Role, "Support");

    let report = builder.save(&backend).await.unwrap();

    assert!(!report.created);
    assert_eq!(report.agent_id, AgentId::new("a-9"));
    assert_eq!(backend.count(|c| matches!(c, Call::CreateAgent(_))), 0);
}

#[test]
fn deleting_an_endpoint_forgets_its_running_probe() {
    let mut builder = valid_builder();
    add_endpoint(&mut builder, "weather");
    let id = builder.draft().endpoints[0].id.clone();
    assert!(builder.start_probe(&id));

    builder.delete_endpoint(&id);

    assert!(builder.draft().endpoints.is_empty());
    assert_eq!(builder.finish_probe(&id), None);
}

#[test]
fn processing_signal_counts_only_pending_members() {
    let mut builder = valid_builder();
    let first = builder
        .drop_files(vec![text_file("a.txt"), text_file("b.txt")])
        .unwrap();
    builder.remove_document(&first[1]);

    assert_eq!(builder.finish_processing(&first), 1);
    assert_eq!(builder.draft().documents[0].status, DocumentStatus::Ready);
    assert_eq!(builder.finish_processing(&first), 0);
}

proptest! {
    #[test]
    fn every_item_is_attempted_once_in_order(
        docs in 0usize..5,
        endpoints in 0usize..5,
        failing in prop::collection::hash_set(1usize..6, 0..4),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let backend = RecordingBackend {
            failing_uploads: failing.clone(),
            failing_endpoints: failing,
            ..RecordingBackend::default()
        };
        let mut builder = valid_builder();
        if docs > 0 {
            builder.drop_files((0..docs).map(|i| text_file(&format!("d{}.txt", i))).collect());
        }
        for i in 0..endpoints {
            add_endpoint(&mut builder, &format!("e{}", i));
        }

        let report = runtime.block_on(builder.save(&backend)).unwrap();

        prop_assert_eq!(report.outcomes.len(), docs + endpoints);
        let calls = backend.calls();
        prop_assert_eq!(calls.len(), 1 + docs + endpoints);
        for (i, call) in calls[1..=docs].iter().enumerate() {
            let is_expected_upload = matches!(call, Call::UploadDocument { file_name, .. } if *file_name == format!("d{}.txt", i));
            prop_assert!(is_expected_upload);
        }
        for (i, call) in calls[1 + docs..].iter().enumerate() {
            let is_expected_endpoint = matches!(call, Call::CreateEndpoint { request, .. } if request.name == format!("e{}", i));
            prop_assert!(is_expected_endpoint);
        }
    }
}
