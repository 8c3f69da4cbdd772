//! Persona editor.
//!
//! Pure function of the current persona: every edit returns a merged copy
//! wrapped in a [`DraftChange`] for the builder to apply. No validation
//! happens here; the role requirement is checked only on save.

use crate::draft::{DraftChange, Persona};

pub const TONE_SUGGESTIONS: &[&str] = &[
    "professional",
    "friendly",
    "casual",
    "technical",
    "empathetic",
];

pub const ROLE_EXAMPLES: &[&str] = &[
    "Senior Sales Engineer",
    "Technical Support Specialist",
    "Product Expert",
    "Customer Success Manager",
    "Integration Specialist",
];

const INSTRUCTIONS_PLACEHOLDER: &str = "No instructions defined yet...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonaField {
    Role,
    Tone,
    Instructions,
    Constraints,
}

impl PersonaField {
    pub fn all() -> &'static [PersonaField] {
        &[
            PersonaField::Role,
            PersonaField::Tone,
            PersonaField::Instructions,
            PersonaField::Constraints,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PersonaField::Role => "Role / Title",
            PersonaField::Tone => "Conversation Tone",
            PersonaField::Instructions => "Instructions & Objectives",
            PersonaField::Constraints => "Constraints & Limitations",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, PersonaField::Instructions | PersonaField::Constraints)
    }
}

impl Persona {
    pub fn get(&self, field: PersonaField) -> &str {
        match field {
            PersonaField::Role => &self.role,
            PersonaField::Tone => &self.tone,
            PersonaField::Instructions => &self.instructions,
            PersonaField::Constraints => &self.constraints,
        }
    }

    /// System prompt preview assembled from the populated fields.
    pub fn preview(&self) -> String {
        let mut out = String::new();
        if !self.role.is_empty() {
            out.push_str(&format!("Role: {}\n\n", self.role));
        }
        if !self.tone.is_empty() {
            out.push_str(&format!("Tone: {}\n\n", self.tone));
        }
        if self.instructions.is_empty() {
            out.push_str(INSTRUCTIONS_PLACEHOLDER);
        } else {
            out.push_str(&self.instructions);
        }
        if !self.constraints.is_empty() {
            out.push_str(&format!("\n\nConstraints:\n{}", self.constraints));
        }
        out
    }
}

/// Replace one field, keeping the rest of `current`.
pub fn update_persona(current: &Persona, field: PersonaField, value: impl Into<String>) -> DraftChange {
    let mut next = current.clone();
    let value = value.into();
    match field {
        PersonaField::Role => next.role = value,
        PersonaField::Tone => next.tone = value,
        PersonaField::Instructions => next.instructions = value,
        PersonaField::Constraints => next.constraints = value,
    }
    DraftChange::Persona(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_keeps_other_fields() {
        let current = Persona {
            role: "Product Expert".to_string(),
            tone: "friendly".to_string(),
            instructions: "Help".to_string(),
            constraints: String::new(),
        };
        let DraftChange::Persona(next) = update_persona(&current, PersonaField::Tone, "casual")
        else {
            panic!("expected persona change");
        };
        assert_eq!(next.tone, "casual");
        assert_eq!(next.role, current.role);
        assert_eq!(next.instructions, current.instructions);
    }

    #[test]
    fn preview_of_empty_persona_is_placeholder() {
        assert_eq!(Persona::default().preview(), INSTRUCTIONS_PLACEHOLDER);
    }

    #[test]
    fn preview_uses_fixed_labels_in_order() {
        let persona = Persona {
            role: "Support".to_string(),
            tone: "technical".to_string(),
            instructions: "Answer precisely.".to_string(),
            constraints: "No pricing.".to_string(),
        };
        assert_eq!(
            persona.preview(),
            "Role: Support\n\nTone: technical\n\nAnswer precisely.\n\nConstraints:\nNo pricing."
        );
    }

    #[test]
    fn preview_skips_empty_tone() {
        let persona = Persona {
            role: "Support".to_string(),
            ..Persona::default()
        };
        assert_eq!(persona.preview(), "Role: Support\n\nNo instructions defined yet...");
    }
}
