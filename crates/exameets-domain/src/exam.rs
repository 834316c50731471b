//! Exam-cycle records: previous-year papers, admit cards and results.

use serde::{Deserialize, Serialize};

use crate::common::{impl_record_traits, RecordId};

/// Archived question paper with optional worked solution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PreviousYearPaper {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub exam_name: String,
    pub subject: String,
    pub year: u16,
    pub paper_link: String,
    #[serde(default)]
    pub solution_link: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl_record_traits!(PreviousYearPaper, exam_name, "Paper");

/// Shift timing printed on an admit card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ShiftDetail {
    pub shift: String,
    pub reporting_time: String,
    pub exam_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AdmitCard {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub exam_name: String,
    pub conducting_body: String,
    pub release_date: String,
    pub exam_date: String,
    pub download_link: String,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub exam_details: Vec<ShiftDetail>,
}

impl_record_traits!(AdmitCard, exam_name, "Admit card");

/// Qualifying marks for one candidate category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Cutoff {
    pub category: String,
    pub marks: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExamResult {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub exam_name: String,
    pub conducting_body: String,
    pub result_date: String,
    pub result_link: String,
    #[serde(default)]
    pub cutoff: Vec<Cutoff>,
    #[serde(default)]
    pub steps_to_check: Vec<String>,
}

impl_record_traits!(ExamResult, exam_name, "Result");
