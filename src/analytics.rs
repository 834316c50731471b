//! Student analytics dashboard: read-only table derived from the analytics
//! endpoint's payload.

use chrono::{DateTime, Utc};

use exameets_domain::{StudentAnalytics, StudentSummary};

#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub registrations: u32,
    pub attempts: usize,
    /// Mean percentage over attempts with a known total.
    pub average_score: Option<f64>,
    pub last_attempt: Option<DateTime<Utc>>,
}

impl StudentRow {
    fn from_summary(student: &StudentSummary) -> Self {
        let percentages: Vec<f64> = student
            .attempts
            .iter()
            .filter_map(|attempt| attempt.percentage())
            .collect();
        let average_score = if percentages.is_empty() {
            None
        } else {
            Some(percentages.iter().sum::<f64>() / percentages.len() as f64)
        };
        Self {
            id: student.id.clone(),
            name: student.name.clone(),
            email: student.email.clone(),
            registrations: student.registered_tests,
            attempts: student.attempts.len(),
            average_score,
            last_attempt: student
                .attempts
                .iter()
                .filter_map(|attempt| attempt.attempted_at)
                .max(),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardTable {
    pub total_students: u32,
    pub total_registrations: u32,
    pub total_attempts: u32,
    pub rows: Vec<StudentRow>,
}

impl DashboardTable {
    pub fn build(analytics: &StudentAnalytics) -> Self {
        let mut rows: Vec<StudentRow> = analytics
            .students
            .iter()
            .map(StudentRow::from_summary)
            .collect();
        rows.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Self {
            total_students: analytics.total_students,
            total_registrations: analytics.total_registrations,
            total_attempts: analytics.total_attempts,
            rows,
        }
    }

    /// Rows whose name or email contains `query`, ignoring case. A blank
    /// query keeps every row.
    pub fn filter(&self, query: &str) -> Vec<&StudentRow> {
        let needle = query.trim().to_lowercase();
        self.rows
            .iter()
            .filter(|row| needle.is_empty() || row.matches(&needle))
            .collect()
    }
}
