//! Read-only student analytics returned by the admin dashboard endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestAttempt {
    #[serde(default)]
    pub test_title: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub total_marks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempted_at: Option<DateTime<Utc>>,
}

impl TestAttempt {
    /// Score as a percentage of the attempt's total marks.
    pub fn percentage(&self) -> Option<f64> {
        if self.total_marks > 0.0 {
            Some(self.score / self.total_marks * 100.0)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub registered_tests: u32,
    #[serde(default)]
    pub attempts: Vec<TestAttempt>,
}

/// Aggregate counters plus per-student detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StudentAnalytics {
    #[serde(default)]
    pub total_students: u32,
    #[serde(default)]
    pub total_registrations: u32,
    #[serde(default)]
    pub total_attempts: u32,
    #[serde(default)]
    pub students: Vec<StudentSummary>,
}
