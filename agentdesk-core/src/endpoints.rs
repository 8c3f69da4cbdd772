//! Endpoint registry editor.
//!
//! One form serves both adding and editing. Editing remembers the id of the
//! endpoint it was seeded from and replaces that entry in place on commit,
//! so an edit can never change an id or the list length.

use crate::draft::{DraftChange, Endpoint};
use crate::enums::HttpMethod;
use crate::error::EndpointFormError;
use crate::new_client_id;
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

/// Delay before the reachability stub reports back.
pub const ENDPOINT_PROBE_DELAY: Duration = Duration::from_millis(1500);

/// Result of a reachability probe. The probe is a stub and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointFormField {
    Name,
    Method,
    Url,
    Description,
    RequestExample,
    ResponseExample,
}

impl EndpointFormField {
    pub fn all() -> &'static [EndpointFormField] {
        &[
            EndpointFormField::Name,
            EndpointFormField::Method,
            EndpointFormField::Url,
            EndpointFormField::Description,
            EndpointFormField::RequestExample,
            EndpointFormField::ResponseExample,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            EndpointFormField::Name => "Endpoint Name",
            EndpointFormField::Method => "HTTP Method",
            EndpointFormField::Url => "Endpoint URL",
            EndpointFormField::Description => "Description",
            EndpointFormField::RequestExample => "Request Example (JSON)",
            EndpointFormField::ResponseExample => "Response Example (JSON)",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            EndpointFormField::Description
                | EndpointFormField::RequestExample
                | EndpointFormField::ResponseExample
        )
    }
}

/// Field values of the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointForm {
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub description: String,
    pub request_example: String,
    pub response_example: String,
    pub headers: BTreeMap<String, String>,
}

impl EndpointForm {
    fn seeded_from(endpoint: &Endpoint) -> Self {
        Self {
            name: endpoint.name.clone(),
            method: endpoint.method,
            url: endpoint.url.clone(),
            description: endpoint.description.clone(),
            request_example: endpoint.request_example.clone(),
            response_example: endpoint.response_example.clone(),
            headers: endpoint.headers.clone(),
        }
    }

    /// Text value of a field. The method is rendered as its verb.
    pub fn text(&self, field: EndpointFormField) -> &str {
        match field {
            EndpointFormField::Name => &self.name,
            EndpointFormField::Method => self.method.as_str(),
            EndpointFormField::Url => &self.url,
            EndpointFormField::Description => &self.description,
            EndpointFormField::RequestExample => &self.request_example,
            EndpointFormField::ResponseExample => &self.response_example,
        }
    }

    /// Set a text field. Ignored for the method, which is a selector.
    pub fn set_text(&mut self, field: EndpointFormField, value: String) {
        match field {
            EndpointFormField::Name => self.name = value,
            EndpointFormField::Url => self.url = value,
            EndpointFormField::Description => self.description = value,
            EndpointFormField::RequestExample => self.request_example = value,
            EndpointFormField::ResponseExample => self.response_example = value,
            EndpointFormField::Method => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Adding,
    Editing(String),
}

#[derive(Debug, Clone, Default)]
pub struct EndpointEditor {
    mode: Option<FormMode>,
    form: EndpointForm,
    probing: HashSet<String>,
}

impl EndpointEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Option<&FormMode> {
        self.mode.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    pub fn form(&self) -> &EndpointForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EndpointForm {
        &mut self.form
    }

    /// Open an empty form for a new endpoint.
    pub fn begin_add(&mut self) {
        self.mode = Some(FormMode::Adding);
        self.form = EndpointForm::default();
    }

    /// Open the form seeded with an existing endpoint.
    pub fn begin_edit(&mut self, endpoint: &Endpoint) {
        self.mode = Some(FormMode::Editing(endpoint.id.clone()));
        self.form = EndpointForm::seeded_from(endpoint);
    }

    pub fn cancel(&mut self) {
        self.mode = None;
        self.form = EndpointForm::default();
    }

    /// Validate the form and produce the new endpoint list.
    ///
    /// On success the form is cleared and closed. On failure it stays open
    /// with its values intact.
    pub fn commit(&mut self, current: &[Endpoint]) -> Result<DraftChange, EndpointFormError> {
        let mode = self.mode.clone().ok_or(EndpointFormError::NotOpen)?;
        if self.form.name.trim().is_empty() || self.form.url.trim().is_empty() {
            return Err(EndpointFormError::MissingNameOrUrl);
        }

        let form = std::mem::take(&mut self.form);
        let next = match mode {
            FormMode::Editing(id) => current
                .iter()
                .map(|existing| {
                    if existing.id == id {
                        Endpoint {
                            id: id.clone(),
                            name: form.name.clone(),
                            method: form.method,
                            url: form.url.clone(),
                            description: form.description.clone(),
                            request_example: form.request_example.clone(),
                            response_example: form.response_example.clone(),
                            headers: form.headers.clone(),
                            registered: existing.registered,
                        }
                    } else {
                        existing.clone()
                    }
                })
                .collect(),
            FormMode::Adding => {
                let mut next = current.to_vec();
                next.push(Endpoint {
                    id: new_client_id(),
                    name: form.name,
                    method: form.method,
                    url: form.url,
                    description: form.description,
                    request_example: form.request_example,
                    response_example: form.response_example,
                    headers: form.headers,
                    registered: false,
                });
                next
            }
        };
        self.mode = None;
        Ok(DraftChange::Endpoints(next))
    }

    /// Drop the entry with `id`. A probe still running for it is
    /// forgotten, so its completion signal reports nothing.
    pub fn remove(&mut self, current: &[Endpoint], id: &str) -> DraftChange {
        self.probing.remove(id);
        DraftChange::Endpoints(current.iter().filter(|e| e.id != id).cloned().collect())
    }

    // ------------------------------------------------------------------------
    // Reachability stub
    // ------------------------------------------------------------------------

    /// Mark a probe as running. Returns false if one is already running for
    /// this endpoint.
    pub fn start_probe(&mut self, id: &str) -> bool {
        self.probing.insert(id.to_string())
    }

    pub fn finish_probe(&mut self, id: &str) -> Option<ProbeOutcome> {
        self.probing.remove(id).then_some(ProbeOutcome::Reachable)
    }

    pub fn is_probing(&self, id: &str) -> bool {
        self.probing.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn endpoints(change: DraftChange) -> Vec<Endpoint> {
        match change {
            DraftChange::Endpoints(list) => list,
            other => panic!("expected endpoints change, got {:?}", other),
        }
    }

    fn add(editor: &mut EndpointEditor, current: &[Endpoint], name: &str) -> Vec<Endpoint> {
        editor.begin_add();
        editor.form_mut().name = name.to_string();
        editor.form_mut().url = format!("https://api.example.com/{}", name);
        endpoints(editor.commit(current).unwrap())
    }

    #[test]
    fn begin_add_resets_to_get_without_headers() {
        let mut editor = EndpointEditor::new();
        editor.form_mut().method = HttpMethod::Delete;
        editor.form_mut().headers.insert("x".into(), "y".into());
        editor.begin_add();
        assert_eq!(editor.form().method, HttpMethod::Get);
        assert!(editor.form().headers.is_empty());
        assert_eq!(editor.mode(), Some(&FormMode::Adding));
    }

    #[test]
    fn commit_requires_name_and_url() {
        let mut editor = EndpointEditor::new();
        editor.begin_add();
        editor.form_mut().name = "Users".to_string();
        assert_eq!(editor.commit(&[]), Err(EndpointFormError::MissingNameOrUrl));
        assert!(editor.is_open());
        assert_eq!(editor.form().name, "Users");

        editor.form_mut().url = "   ".to_string();
        assert_eq!(editor.commit(&[]), Err(EndpointFormError::MissingNameOrUrl));
    }

    #[test]
    fn commit_without_open_form_is_rejected() {
        let mut editor = EndpointEditor::new();
        assert_eq!(editor.commit(&[]), Err(EndpointFormError::NotOpen));
    }

    #[test]
    fn add_appends_and_closes_form() {
        let mut editor = EndpointEditor::new();
        let list = add(&mut editor, &[], "users");
        let list = add(&mut editor, &list, "orders");
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "orders");
        assert!(!editor.is_open());
        assert_eq!(editor.form(), &EndpointForm::default());
    }

    #[test]
    fn edit_replaces_in_place() {
        let mut editor = EndpointEditor::new();
        let list = add(&mut editor, &[], "users");
        let list = add(&mut editor, &list, "orders");
        let target = list[0].clone();

        editor.begin_edit(&target);
        assert_eq!(editor.mode(), Some(&FormMode::Editing(target.id.clone())));
        assert_eq!(editor.form().name, "users");
        editor.form_mut().method = HttpMethod::Post;
        editor.form_mut().name = "create user".to_string();
        let edited = endpoints(editor.commit(&list).unwrap());

        assert_eq!(edited.len(), 2);
        assert_eq!(edited[0].id, target.id);
        assert_eq!(edited[0].name, "create user");
        assert_eq!(edited[0].method, HttpMethod::Post);
        assert_eq!(edited[1], list[1]);
    }

    #[test]
    fn remove_by_id() {
        let mut editor = EndpointEditor::new();
        let list = add(&mut editor, &[], "users");
        let list = add(&mut editor, &list, "orders");
        let remaining = endpoints(editor.remove(&list, &list[0].id));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "orders");
    }

    #[test]
    fn probes_are_tracked_per_endpoint() {
        let mut editor = EndpointEditor::new();
        assert!(editor.start_probe("a"));
        assert!(!editor.start_probe("a"));
        assert!(editor.start_probe("b"));
        assert_eq!(editor.finish_probe("a"), Some(ProbeOutcome::Reachable));
        assert!(!editor.is_probing("a"));
        assert!(editor.is_probing("b"));
        assert_eq!(editor.finish_probe("a"), None);
    }

    #[test]
    fn removing_an_endpoint_cancels_its_probe() {
        let mut editor = EndpointEditor::new();
        let list = add(&mut editor, &[], "users");
        let list = add(&mut editor, &list, "orders");
        assert!(editor.start_probe(&list[0].id));
        assert!(editor.start_probe(&list[1].id));

        let remaining = endpoints(editor.remove(&list, &list[0].id));
        assert_eq!(remaining.len(), 1);
        assert!(!editor.is_probing(&list[0].id));
        assert_eq!(editor.finish_probe(&list[0].id), None);
        assert_eq!(editor.finish_probe(&list[1].id), Some(ProbeOutcome::Reachable));
    }

    proptest! {
        #[test]
        fn edit_preserves_length_and_id(count in 1usize..8, pick in 0usize..8, name in "[a-z]{1,12}") {
            let mut editor = EndpointEditor::new();
            let mut list = Vec::new();
            for i in 0..count {
                list = add(&mut editor, &list, &format!("ep{}", i));
            }
            let target = list[pick % count].clone();
            editor.begin_edit(&target);
            editor.form_mut().name = name.clone();
            let edited = endpoints(editor.commit(&list).unwrap());
            prop_assert_eq!(edited.len(), list.len());
            let position = list.iter().position(|e| e.id == target.id).unwrap();
            prop_assert_eq!(&edited[position].id, &target.id);
            prop_assert_eq!(&edited[position].name, &name);
        }
    }
}
