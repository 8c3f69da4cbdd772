//! Error types for draft editing and saving

use std::fmt;
use thiserror::Error;

/// Field that must be filled before an agent can be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    AgentName,
    AgentDescription,
    PersonaRole,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequiredField::AgentName => "Agent name",
            RequiredField::AgentDescription => "Agent description",
            RequiredField::PersonaRole => "Persona role",
        };
        f.write_str(label)
    }
}

/// Client-side validation failure. Raised before any network request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(RequiredField),
}

/// Endpoint form rejected on commit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EndpointFormError {
    #[error("Please fill in name and URL")]
    MissingNameOrUrl,

    #[error("No endpoint form is open")]
    NotOpen,
}

/// Failure while staging dropped files into the draft.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Failed to upload documents: {reason}")]
    StagingFailed { reason: String },
}

/// Errors reported by an [`AgentBackend`](crate::AgentBackend).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Reasons a save attempt stopped before completing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A save is already in progress")]
    InProgress,

    #[error("No save has been started")]
    NotStarted,

    #[error("Failed to save agent: {0}")]
    AgentRejected(BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_field() {
        let err = ValidationError::Missing(RequiredField::PersonaRole);
        assert_eq!(err.to_string(), "Persona role is required");
        let err = SaveError::from(ValidationError::Missing(RequiredField::AgentName));
        assert_eq!(err.to_string(), "Agent name is required");
    }
}
