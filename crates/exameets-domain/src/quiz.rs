//! Test courses and quiz questions, plus the request/response bodies of the
//! quiz endpoints. These payloads use camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::common::{Displayable, Identifiable, NamedEntity, RecordId};

/// A timed test that questions are attached to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestCourse {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub total_marks: u32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub questions_per_test: u32,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_date: Option<String>,
}

impl Identifiable for TestCourse {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl NamedEntity for TestCourse {
    fn name(&self) -> &str {
        &self.title
    }
}

impl Displayable for TestCourse {
    fn display_label(&self) -> String {
        format!("{} ({} min, {} marks)", self.title, self.duration_minutes, self.total_marks)
    }
}

/// Body of `GET /api/tests/active`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ActiveTestsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub tests: Vec<TestCourse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionOption {
    pub text: String,
}

impl QuestionOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Body of `POST /api/questions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionRequest {
    pub question_text: String,
    pub options: Vec<QuestionOption>,
    pub correct_option_index: usize,
    pub min_time_to_solve: u32,
    pub test_course_ids: Vec<RecordId>,
}

/// Successful response of `POST /api/questions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionResponse {
    #[serde(default)]
    pub added_to_test_courses: Vec<RecordId>,
}

/// Body of `POST /api/tests`. New courses always start without questions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestCourseRequest {
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    pub total_marks: u32,
    pub is_active: bool,
    pub questions_per_test: u32,
    pub instructions: Vec<String>,
    pub test_date: String,
    pub questions: Vec<RecordId>,
}

/// Body returned after a course is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreateTestCourseResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<TestCourse>,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_question_request_uses_camel_case_keys() {
        let request = AddQuestionRequest {
            question_text: "2 + 2 = ?".into(),
            options: vec![QuestionOption::new("3"), QuestionOption::new("4")],
            correct_option_index: 1,
            min_time_to_solve: 30,
            test_course_ids: vec!["t1".into()],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["questionText"], "2 + 2 = ?");
        assert_eq!(value["options"][1]["text"], "4");
        assert_eq!(value["correctOptionIndex"], 1);
        assert_eq!(value["minTimeToSolve"], 30);
        assert_eq!(value["testCourseIds"][0], "t1");
    }

    #[test]
    fn active_tests_response_tolerates_sparse_courses() {
        let body = r#"{"success":true,"tests":[{"_id":"t1","title":"Mock 1"}]}"#;
        let parsed: ActiveTestsResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.tests[0].id(), Some("t1"));
        assert_eq!(parsed.tests[0].duration_minutes, 0);
    }
}
