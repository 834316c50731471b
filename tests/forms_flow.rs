use std::sync::{Arc, Mutex};

use exameets_admin::auth::{Principal, Role, SessionAuth};
use exameets_admin::forms::{
    is_valid, parse_edit, CollectionEditor, GateAction, Modal, Submission, SubmissionGate,
    SubmitOutcome, ValidationIssue,
};
use exameets_admin::records::opportunity::{government_job_schema, scholarship_schema};
use exameets_admin::records::{decode, GovernmentJobField, ScholarshipField};
use exameets_domain::GovernmentJob;
use serde_json::json;

fn admin() -> SessionAuth {
    SessionAuth::signed_in(Principal::new("a1", Role::Admin))
}

fn apply_all<F: exameets_admin::forms::FieldId>(
    modal: &mut Modal<F>,
    schema: &exameets_admin::forms::FieldSchema<F>,
    tokens: &[&str],
) {
    let store = modal.store_mut().expect("modal open");
    for token in tokens {
        let edit = parse_edit(schema, token).unwrap_or_else(|err| panic!("{token}: {err}"));
        CollectionEditor::apply_edit(store, edit);
    }
}

#[test]
fn government_job_is_built_from_lists_and_submitted_once() {
    let schema = Arc::new(government_job_schema());
    let submitted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&submitted);
    let mut modal = Modal::new(
        Arc::clone(&schema),
        SubmissionGate::default(),
        move |submission| sink.lock().unwrap().push(submission),
        || {},
    );
    modal.open_create();

    apply_all(
        &mut modal,
        &schema,
        &[
            "title=Junior Clerk",
            "department=Railways",
            "total_posts=120",
            "qualification=Graduate",
            "last_date=2025-06-30",
            "notification_link=https://gov.example/n/1",
        ],
    );
    let control = modal.control(&admin()).expect("open");
    assert!(!control.enabled());
    assert!(control.issues.iter().any(|issue| matches!(
        issue,
        ValidationIssue::TooFewItems {
            key: "vacancies",
            min: 1,
            actual: 0,
            ..
        }
    )));

    apply_all(
        &mut modal,
        &schema,
        &[
            "vacancies.post_name=Clerk",
            "vacancies.count=100",
            "vacancies+",
            "vacancies+=Typist|20",
            "important_dates+=Last date|2025-06-30",
            "selection_process+=  Written test ",
            "selection_process+=   ",
        ],
    );
    let store = modal.store().expect("open");
    assert!(is_valid(store));
    assert_eq!(store.object_list(GovernmentJobField::Vacancies).len(), 2);
    assert_eq!(store.string_list(GovernmentJobField::SelectionProcess), ["Written test"]);

    let job: GovernmentJob = decode(store).expect("decode");
    assert_eq!(job.total_posts, 120);
    assert_eq!(job.vacancies[1].post_name, "Typist");

    assert_eq!(modal.submit(&admin()), SubmitOutcome::Submitted);
    assert!(!modal.is_open());
    assert_eq!(modal.submit(&admin()), SubmitOutcome::NotOpen);

    let submitted = submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    let Submission::Create(record) = &submitted[0] else {
        panic!("expected a create submission");
    };
    assert_eq!(record["vacancies"][0], json!({"post_name": "Clerk", "count": "100"}));
}

#[test]
fn valid_form_still_redirects_an_anonymous_operator() {
    let schema = Arc::new(scholarship_schema());
    let mut modal = Modal::new(
        Arc::clone(&schema),
        SubmissionGate::new("/admin/login"),
        |_| {},
        || {},
    );
    modal.open_edit(
        "sch-1",
        &json!({
            "_id": "sch-1",
            "name": "Merit award",
            "provider": "Trust",
            "amount": "50000",
            "deadline": "2025-04-01T00:00:00.000Z",
            "eligibility_criteria": ["Class 12"],
            "application_link": "https://trust.example/apply"
        }),
    );
    let store = modal.store().expect("open");
    assert_eq!(store.text(ScholarshipField::Name), Some("Merit award"));
    assert!(is_valid(store));

    let control = modal.control(&SessionAuth::anonymous()).expect("open");
    assert_eq!(
        control.action,
        GateAction::RedirectToLogin {
            route: "/admin/login".into()
        }
    );
    assert_eq!(
        modal.submit(&SessionAuth::anonymous()),
        SubmitOutcome::Redirect {
            route: "/admin/login".into()
        }
    );
    // Redirecting does not discard the operator's input.
    assert!(modal.is_open());
}
