//! Enum types for agent drafts

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// HTTP METHOD
// ============================================================================

/// HTTP verb of a registered endpoint.
///
/// The selector only offers these five; anything else is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn all() -> &'static [HttpMethod] {
        &[
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Patch,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|m| m == self).unwrap_or(0)
    }

    /// Next entry in the selector, wrapping around.
    pub fn next(&self) -> HttpMethod {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    /// Previous entry in the selector, wrapping around.
    pub fn previous(&self) -> HttpMethod {
        let all = Self::all();
        let idx = self.index();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// DOCUMENT STATUS
// ============================================================================

/// Lifecycle status of a document in the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Uploading,
    Processing,
    Ready,
    Error,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Uploading => "uploading",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Ready => "ready",
            DocumentStatus::Error => "error",
        }
    }

    /// Whether the document is still waiting on a completion signal.
    pub fn is_pending(&self) -> bool {
        matches!(self, DocumentStatus::Uploading | DocumentStatus::Processing)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// BUILDER TABS
// ============================================================================

/// Section of the builder currently shown. Exactly one is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuilderTab {
    #[default]
    Persona,
    Documents,
    Endpoints,
}

impl BuilderTab {
    pub fn title(&self) -> &'static str {
        match self {
            BuilderTab::Persona => "Persona & Instructions",
            BuilderTab::Documents => "Documents",
            BuilderTab::Endpoints => "API Endpoints",
        }
    }

    pub fn all() -> &'static [BuilderTab] {
        &[BuilderTab::Persona, BuilderTab::Documents, BuilderTab::Endpoints]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> BuilderTab {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> BuilderTab {
        let all = Self::all();
        let idx = self.index();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_cycle_visits_every_verb() {
        let mut method = HttpMethod::Get;
        let mut seen = Vec::new();
        for _ in 0..HttpMethod::all().len() {
            seen.push(method);
            method = method.next();
        }
        assert_eq!(method, HttpMethod::Get);
        assert_eq!(seen, HttpMethod::all());
        assert_eq!(HttpMethod::Get.previous(), HttpMethod::Patch);
    }

    #[test]
    fn method_round_trips_through_wire_name() {
        for method in HttpMethod::all() {
            let json = serde_json::to_string(method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
            let back: HttpMethod = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *method);
        }
        assert!(serde_json::from_str::<HttpMethod>("\"OPTIONS\"").is_err());
    }

    #[test]
    fn document_status_wire_names_are_lowercase() {
        let json = serde_json::to_string(&DocumentStatus::Uploading).unwrap();
        assert_eq!(json, "\"uploading\"");
        assert!(DocumentStatus::Processing.is_pending());
        assert!(!DocumentStatus::Ready.is_pending());
    }

    #[test]
    fn builder_tabs_wrap() {
        assert_eq!(BuilderTab::Endpoints.next(), BuilderTab::Persona);
        assert_eq!(BuilderTab::Persona.previous(), BuilderTab::Endpoints);
    }
}
