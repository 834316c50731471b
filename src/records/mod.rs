//! Field schemas for every record modal of the admin portal.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::errors::AdminError;
use crate::forms::{FieldId, FieldSchema, FormStore};

/// Declares a field enum and its [`FieldId`] impl from `Variant => ("key", "Label")` pairs.
macro_rules! record_fields {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($key:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $crate::forms::FieldId for $name {
            fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}

pub mod exam;
pub mod opportunity;
pub mod quiz;
pub mod team;

pub use exam::{AdmitCardField, PaperField, ResultField};
pub use opportunity::{AdmissionField, GovernmentJobField, InternshipField, ScholarshipField};
pub use quiz::{QuestionField, TestCourseField};
pub use team::TeamMemberField;

/// Sub-fields shared by every "important dates" list.
pub(crate) const IMPORTANT_DATE_FIELDS: &[&str] = &["event", "date"];

/// CRUD records managed through the generic record endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Admission,
    Internship,
    Scholarship,
    Paper,
    GovernmentJob,
    AdmitCard,
    Result,
    TeamMember,
}

impl RecordKind {
    pub const ALL: [RecordKind; 8] = [
        RecordKind::Admission,
        RecordKind::Internship,
        RecordKind::Scholarship,
        RecordKind::Paper,
        RecordKind::GovernmentJob,
        RecordKind::AdmitCard,
        RecordKind::Result,
        RecordKind::TeamMember,
    ];

    /// REST resource under `/api/`.
    pub fn resource(self) -> &'static str {
        match self {
            RecordKind::Admission => "admissions",
            RecordKind::Internship => "internships",
            RecordKind::Scholarship => "scholarships",
            RecordKind::Paper => "papers",
            RecordKind::GovernmentJob => "govt-jobs",
            RecordKind::AdmitCard => "admit-cards",
            RecordKind::Result => "results",
            RecordKind::TeamMember => "team",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            RecordKind::Admission => "admission",
            RecordKind::Internship => "internship",
            RecordKind::Scholarship => "scholarship",
            RecordKind::Paper => "paper",
            RecordKind::GovernmentJob => "job",
            RecordKind::AdmitCard => "admit-card",
            RecordKind::Result => "result",
            RecordKind::TeamMember => "team",
        }
    }
}

/// Work that needs a record's concrete field type. Lets callers holding
/// only a [`RecordKind`] run generic form code.
pub trait SchemaVisitor {
    type Output;

    fn visit<F: FieldId>(self, schema: FieldSchema<F>) -> Self::Output;
}

impl RecordKind {
    pub fn with_schema<V: SchemaVisitor>(self, visitor: V) -> V::Output {
        match self {
            RecordKind::Admission => visitor.visit(opportunity::admission_schema()),
            RecordKind::Internship => visitor.visit(opportunity::internship_schema()),
            RecordKind::Scholarship => visitor.visit(opportunity::scholarship_schema()),
            RecordKind::Paper => visitor.visit(exam::paper_schema()),
            RecordKind::GovernmentJob => visitor.visit(opportunity::government_job_schema()),
            RecordKind::AdmitCard => visitor.visit(exam::admit_card_schema()),
            RecordKind::Result => visitor.visit(exam::result_schema()),
            RecordKind::TeamMember => visitor.visit(team::team_member_schema()),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        let kind = match normalized.as_str() {
            "admission" | "admissions" => RecordKind::Admission,
            "internship" | "internships" => RecordKind::Internship,
            "scholarship" | "scholarships" => RecordKind::Scholarship,
            "paper" | "papers" | "pyq" => RecordKind::Paper,
            "job" | "jobs" | "govt-job" | "govt-jobs" => RecordKind::GovernmentJob,
            "admit-card" | "admit-cards" | "admitcard" => RecordKind::AdmitCard,
            "result" | "results" => RecordKind::Result,
            "team" | "team-member" | "member" => RecordKind::TeamMember,
            other => return Err(format!("unknown record kind `{other}`")),
        };
        Ok(kind)
    }
}

/// Converts a completed form into its typed domain record.
pub fn decode<T: DeserializeOwned, F: FieldId>(store: &FormStore<F>) -> Result<T, AdminError> {
    serde_json::from_value(store.to_json()).map_err(AdminError::from)
}
