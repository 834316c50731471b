//! Submission gate: decides whether a form may be submitted and what the
//! submit control does when activated.

use std::fmt;

use super::schema::{FieldId, FieldKind};
use super::store::FormStore;
use super::value::FieldValue;
use crate::auth::{AuthContext, RecordAction};

/// Reason a record is not yet valid to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    Missing {
        key: &'static str,
        label: &'static str,
    },
    TooFewItems {
        key: &'static str,
        label: &'static str,
        min: usize,
        actual: usize,
    },
}

impl ValidationIssue {
    pub fn key(&self) -> &'static str {
        match self {
            ValidationIssue::Missing { key, .. } | ValidationIssue::TooFewItems { key, .. } => key,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Missing { label, .. } => write!(f, "{label} is required"),
            ValidationIssue::TooFewItems {
                label, min, actual, ..
            } => write!(
                f,
                "{label} needs at least {min} item{} (has {actual})",
                if *min == 1 { "" } else { "s" }
            ),
        }
    }
}

/// Checks required fields and minimum collection sizes. Pure; recomputed on
/// every call.
pub fn validate<F: FieldId>(store: &FormStore<F>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for spec in store.schema().fields() {
        let value = store.value(spec.id);
        if let Some(len) = value.and_then(FieldValue::len).or_else(|| {
            // List fields always count, even before their first item.
            spec.kind.is_list().then_some(0)
        }) {
            let min = if spec.required {
                spec.min_items.max(1)
            } else {
                spec.min_items
            };
            if len < min {
                issues.push(ValidationIssue::TooFewItems {
                    key: spec.key(),
                    label: spec.label(),
                    min,
                    actual: len,
                });
            }
            continue;
        }
        if !spec.required {
            continue;
        }
        let present = match (&spec.kind, value) {
            (FieldKind::Scalar(_), Some(FieldValue::Scalar(scalar))) => !scalar.is_blank(),
            (FieldKind::LinkMap { .. }, Some(FieldValue::LinkMap(links))) => {
                links.values().any(|url| !url.trim().is_empty())
            }
            _ => false,
        };
        if !present {
            issues.push(ValidationIssue::Missing {
                key: spec.key(),
                label: spec.label(),
            });
        }
    }
    issues
}

pub fn is_valid<F: FieldId>(store: &FormStore<F>) -> bool {
    validate(store).is_empty()
}

/// What activating the submit control does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    Submit,
    RedirectToLogin { route: String },
}

/// Result of evaluating the gate for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
    pub action: GateAction,
}

impl GateOutcome {
    /// Whether the submit control is enabled.
    pub fn enabled(&self) -> bool {
        self.valid
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionGate {
    login_route: String,
}

impl SubmissionGate {
    pub fn new(login_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
        }
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Field validity and authorization are evaluated independently.
    pub fn evaluate<F: FieldId>(
        &self,
        store: &FormStore<F>,
        auth: &dyn AuthContext,
        action: RecordAction,
    ) -> GateOutcome {
        let issues = validate(store);
        let gate_action = if auth.may(action) {
            GateAction::Submit
        } else {
            GateAction::RedirectToLogin {
                route: self.login_route.clone(),
            }
        };
        GateOutcome {
            valid: issues.is_empty(),
            issues,
            action: gate_action,
        }
    }
}

impl Default for SubmissionGate {
    fn default() -> Self {
        Self::new("/login")
    }
}
