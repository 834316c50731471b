//! Admissions, internships, scholarships and government job postings.

use serde::{Deserialize, Serialize};

use crate::common::{impl_record_traits, ImportantDate, RecordId};

/// One row of an admission's exam schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExamDetail {
    pub exam_name: String,
    pub exam_date: String,
    pub mode: String,
}

/// College or programme admission notice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Admission {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub institute: String,
    pub course: String,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_fee: Option<f64>,
    #[serde(default)]
    pub application_start: String,
    pub application_end: String,
    pub official_link: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub important_dates: Vec<ImportantDate>,
    #[serde(default)]
    pub required_documents: Vec<String>,
    #[serde(default)]
    pub exam_details: Vec<ExamDetail>,
}

impl_record_traits!(Admission, title, "Admission");

/// Internship listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Internship {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub organization: String,
    pub location: String,
    #[serde(default)]
    pub stipend: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub mode: String,
    pub deadline: String,
    pub apply_link: String,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

impl_record_traits!(Internship, title, "Internship");

/// Scholarship programme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Scholarship {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub provider: String,
    pub amount: String,
    pub deadline: String,
    pub application_link: String,
    #[serde(default)]
    pub eligibility_criteria: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub documents_required: Vec<String>,
    #[serde(default)]
    pub important_dates: Vec<ImportantDate>,
}

impl_record_traits!(Scholarship, name, "Scholarship");

/// Number of openings for one post in a recruitment notice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Vacancy {
    pub post_name: String,
    pub count: String,
}

/// Application fee for one candidate category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CategoryFee {
    pub category: String,
    pub fee: String,
}

/// Government recruitment notice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GovernmentJob {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub department: String,
    pub total_posts: u32,
    pub qualification: String,
    pub last_date: String,
    pub notification_link: String,
    #[serde(default)]
    pub apply_link: String,
    #[serde(default)]
    pub age_limit: String,
    #[serde(default)]
    pub vacancies: Vec<Vacancy>,
    #[serde(default)]
    pub selection_process: Vec<String>,
    #[serde(default)]
    pub important_dates: Vec<ImportantDate>,
    #[serde(default)]
    pub application_fee: Vec<CategoryFee>,
}

impl_record_traits!(GovernmentJob, title, "Government job");
