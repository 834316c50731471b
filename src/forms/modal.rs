//! Modal contract shared by every create/edit form.
//!
//! A modal owns one [`FormStore`] while open. Closing (cancel, successful
//! submit, or external dismissal) drops the store; nothing is kept between
//! sessions.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::gate::{GateAction, GateOutcome, SubmissionGate, ValidationIssue};
use super::schema::{FieldId, FieldSchema};
use super::store::FormStore;
use crate::auth::{AuthContext, RecordAction};

/// Edit submissions carry the record id next to the changed data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditEnvelope {
    pub id: String,
    pub updated_data: Value,
}

/// Payload handed to the `on_submit` callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(Value),
    Update(EditEnvelope),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit { id: String },
}

impl ModalMode {
    pub fn action(&self) -> RecordAction {
        match self {
            ModalMode::Create => RecordAction::Create,
            ModalMode::Edit { .. } => RecordAction::Edit,
        }
    }
}

/// Result of activating the submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record went to `on_submit` and the modal closed.
    Submitted,
    /// The principal may not submit; navigate to the login route.
    Redirect { route: String },
    /// The record is incomplete; nothing was sent.
    Blocked(Vec<ValidationIssue>),
    /// The modal was not open.
    NotOpen,
}

type SubmitCallback = Box<dyn FnMut(Submission) + Send>;
type CloseCallback = Box<dyn FnMut() + Send>;

pub struct Modal<F: FieldId> {
    schema: Arc<FieldSchema<F>>,
    gate: SubmissionGate,
    session: Option<(ModalMode, FormStore<F>)>,
    on_submit: SubmitCallback,
    on_close: CloseCallback,
}

impl<F: FieldId> Modal<F> {
    pub fn new(
        schema: Arc<FieldSchema<F>>,
        gate: SubmissionGate,
        on_submit: impl FnMut(Submission) + Send + 'static,
        on_close: impl FnMut() + Send + 'static,
    ) -> Self {
        Self {
            schema,
            gate,
            session: None,
            on_submit: Box::new(on_submit),
            on_close: Box::new(on_close),
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn mode(&self) -> Option<&ModalMode> {
        self.session.as_ref().map(|(mode, _)| mode)
    }

    /// Opens an empty form for a new record.
    pub fn open_create(&mut self) {
        let store = FormStore::new(Arc::clone(&self.schema));
        debug!(form = self.schema.name, session = %store.session(), "modal opened for create");
        self.session = Some((ModalMode::Create, store));
    }

    /// Opens the form pre-populated from an existing record.
    pub fn open_edit(&mut self, id: impl Into<String>, existing: &Value) {
        let id = id.into();
        let store = FormStore::from_json(Arc::clone(&self.schema), existing);
        debug!(form = self.schema.name, session = %store.session(), %id, "modal opened for edit");
        self.session = Some((ModalMode::Edit { id }, store));
    }

    pub fn store(&self) -> Option<&FormStore<F>> {
        self.session.as_ref().map(|(_, store)| store)
    }

    pub fn store_mut(&mut self) -> Option<&mut FormStore<F>> {
        self.session.as_mut().map(|(_, store)| store)
    }

    /// Current state of the submit control, if open.
    pub fn control(&self, auth: &dyn AuthContext) -> Option<GateOutcome> {
        self.session
            .as_ref()
            .map(|(mode, store)| self.gate.evaluate(store, auth, mode.action()))
    }

    /// Discards the form and notifies the owner.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            (self.on_close)();
        }
    }

    pub fn submit(&mut self, auth: &dyn AuthContext) -> SubmitOutcome {
        let Some(outcome) = self.control(auth) else {
            return SubmitOutcome::NotOpen;
        };
        if let GateAction::RedirectToLogin { route } = outcome.action {
            info!(form = self.schema.name, %route, "submit requires sign-in");
            return SubmitOutcome::Redirect { route };
        }
        if !outcome.valid {
            return SubmitOutcome::Blocked(outcome.issues);
        }
        let Some((mode, store)) = self.session.as_ref() else {
            return SubmitOutcome::NotOpen;
        };
        let record = store.to_json();
        let submission = match mode {
            ModalMode::Create => Submission::Create(record),
            ModalMode::Edit { id } => Submission::Update(EditEnvelope {
                id: id.clone(),
                updated_data: record,
            }),
        };
        info!(form = self.schema.name, session = %store.session(), "form submitted");
        (self.on_submit)(submission);
        self.close();
        SubmitOutcome::Submitted
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::auth::{Principal, Role, SessionAuth};
    use crate::forms::schema::tests::{demo_schema, DemoField};
    use crate::forms::store::BufferKey;

    struct Harness {
        modal: Modal<DemoField>,
        submitted: Arc<Mutex<Vec<Submission>>>,
        closed: Arc<Mutex<usize>>,
    }

    fn harness() -> Harness {
        let submitted = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&submitted);
        let close_count = Arc::clone(&closed);
        let modal = Modal::new(
            Arc::new(demo_schema()),
            SubmissionGate::new("/login"),
            move |submission| sink.lock().unwrap().push(submission),
            move || *close_count.lock().unwrap() += 1,
        );
        Harness {
            modal,
            submitted,
            closed,
        }
    }

    fn fill(store: &mut FormStore<DemoField>) {
        store.set_scalar(DemoField::Title, "X");
        store.set_scalar(DemoField::Organization, "Y");
        store.set_pending_input(BufferKey::Item(DemoField::Skills), "Go");
        store.commit_list_item(DemoField::Skills);
    }

    #[test]
    fn create_submission_hands_over_the_record_and_closes() {
        let mut h = harness();
        let admin = SessionAuth::signed_in(Principal::new("a1", Role::Admin));
        h.modal.open_create();
        assert_eq!(
            h.modal.submit(&admin),
            SubmitOutcome::Blocked(vec![
                ValidationIssue::Missing {
                    key: "title",
                    label: "Title"
                },
                ValidationIssue::Missing {
                    key: "organization",
                    label: "Organization"
                },
                ValidationIssue::TooFewItems {
                    key: "skills_required",
                    label: "Skills required",
                    min: 1,
                    actual: 0
                },
            ])
        );
        assert!(h.modal.is_open());

        fill(h.modal.store_mut().unwrap());
        assert_eq!(h.modal.submit(&admin), SubmitOutcome::Submitted);
        assert!(!h.modal.is_open());
        assert_eq!(*h.closed.lock().unwrap(), 1);

        let submitted = h.submitted.lock().unwrap();
        match &submitted[0] {
            Submission::Create(record) => {
                assert_eq!(record["title"], "X");
                assert_eq!(record["skills_required"][0], "Go");
            }
            other => panic!("unexpected submission {other:?}"),
        }
    }

    #[test]
    fn edit_submission_wraps_the_id() {
        let mut h = harness();
        let manager = SessionAuth::signed_in(Principal::new("m1", Role::Manager));
        h.modal.open_edit(
            "rec-1",
            &serde_json::json!({"title": "Old", "organization": "Y", "skills_required": ["Go"]}),
        );
        h.modal
            .store_mut()
            .unwrap()
            .set_scalar(DemoField::Title, "New");
        assert_eq!(h.modal.submit(&manager), SubmitOutcome::Submitted);

        let submitted = h.submitted.lock().unwrap();
        let Submission::Update(envelope) = &submitted[0] else {
            panic!("expected update");
        };
        assert_eq!(envelope.id, "rec-1");
        assert_eq!(envelope.updated_data["title"], "New");
        let wire = serde_json::to_value(envelope).unwrap();
        assert!(wire.get("updatedData").is_some());
    }

    #[test]
    fn unauthorized_submit_redirects_without_calling_back() {
        let mut h = harness();
        h.modal.open_create();
        fill(h.modal.store_mut().unwrap());
        assert_eq!(
            h.modal.submit(&SessionAuth::anonymous()),
            SubmitOutcome::Redirect {
                route: "/login".into()
            }
        );
        assert!(h.submitted.lock().unwrap().is_empty());
        assert!(h.modal.is_open());
    }

    #[test]
    fn closing_discards_the_form() {
        let mut h = harness();
        h.modal.open_create();
        h.modal.store_mut().unwrap().set_scalar(DemoField::Title, "draft");
        h.modal.close();
        h.modal.close();
        assert_eq!(*h.closed.lock().unwrap(), 1);
        h.modal.open_create();
        assert_eq!(h.modal.store().unwrap().text(DemoField::Title), None);
        assert_eq!(
            h.modal.submit(&SessionAuth::anonymous()),
            SubmitOutcome::Redirect {
                route: "/login".into()
            }
        );
    }
}
