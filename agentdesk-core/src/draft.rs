//! The in-memory agent draft and its entries.

use crate::enums::{DocumentStatus, HttpMethod};
use crate::Timestamp;
use std::collections::BTreeMap;
use std::fmt;

/// Free-text persona configuration. Any field may be empty while editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Persona {
    pub role: String,
    pub tone: String,
    pub instructions: String,
    pub constraints: String,
}

/// Binary payload of a dropped file, kept until its upload succeeds.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub bytes: Vec<u8>,
}

impl fmt::Debug for PendingFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingFile")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A file handed to the document panel by a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub status: DocumentStatus,
    pub uploaded_at: Timestamp,
    pub file: Option<PendingFile>,
}

impl Document {
    /// Whether the save protocol still has to send this document.
    pub fn has_pending_upload(&self) -> bool {
        self.file.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub id: String,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub description: String,
    pub request_example: String,
    pub response_example: String,
    pub headers: BTreeMap<String, String>,
    /// Set once the backend accepted this endpoint for the current agent.
    pub registered: bool,
}

/// Everything the builder edits for one agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentDraft {
    pub name: String,
    pub description: String,
    pub persona: Persona,
    pub documents: Vec<Document>,
    pub endpoints: Vec<Endpoint>,
}

/// A new value for one slice of the draft, produced by a section editor.
///
/// Editors never mutate the draft themselves; they read the current slice
/// and hand the replacement back to the builder, which applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftChange {
    Persona(Persona),
    Documents(Vec<Document>),
    Endpoints(Vec<Endpoint>),
}

impl AgentDraft {
    pub fn apply(&mut self, change: DraftChange) {
        match change {
            DraftChange::Persona(persona) => self.persona = persona,
            DraftChange::Documents(documents) => self.documents = documents,
            DraftChange::Endpoints(endpoints) => self.endpoints = endpoints,
        }
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn endpoint(&self, id: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }
}
