#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use exameets_admin::api::ExamApi;
use exameets_admin::errors::AdminError;
use exameets_admin::records::RecordKind;
use exameets_domain::{
    ActiveTestsResponse, AddQuestionRequest, AddQuestionResponse, CreateTestCourseRequest,
    CreateTestCourseResponse, StudentAnalytics, TestCourse,
};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated home directory for the admin configuration.
pub fn test_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// In-memory API that either answers or fails every call with one message.
#[derive(Default)]
pub struct StubApi {
    pub fail_with: Option<String>,
    pub questions: Mutex<Vec<AddQuestionRequest>>,
    pub records: Mutex<Vec<(RecordKind, Value)>>,
}

impl StubApi {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), AdminError> {
        match &self.fail_with {
            Some(message) => Err(AdminError::Api {
                status: 400,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ExamApi for StubApi {
    async fn list_active_tests(&self) -> Result<ActiveTestsResponse, AdminError> {
        self.check()?;
        Ok(ActiveTestsResponse {
            success: true,
            tests: vec![TestCourse {
                id: Some("t1".into()),
                title: "Mock 1".into(),
                ..TestCourse::default()
            }],
        })
    }

    async fn add_question(
        &self,
        request: &AddQuestionRequest,
    ) -> Result<AddQuestionResponse, AdminError> {
        self.check()?;
        self.questions.lock().unwrap().push(request.clone());
        Ok(AddQuestionResponse {
            added_to_test_courses: request.test_course_ids.clone(),
        })
    }

    async fn create_test_course(
        &self,
        request: &CreateTestCourseRequest,
    ) -> Result<CreateTestCourseResponse, AdminError> {
        self.check()?;
        Ok(CreateTestCourseResponse {
            success: true,
            message: None,
            test: Some(TestCourse {
                id: Some("t9".into()),
                title: request.title.clone(),
                ..TestCourse::default()
            }),
        })
    }

    async fn student_analytics(&self) -> Result<StudentAnalytics, AdminError> {
        self.check()?;
        Ok(StudentAnalytics::default())
    }

    async fn create_record(&self, kind: RecordKind, record: &Value) -> Result<Value, AdminError> {
        self.check()?;
        self.records.lock().unwrap().push((kind, record.clone()));
        Ok(json!({"_id": "created"}))
    }

    async fn update_record(
        &self,
        kind: RecordKind,
        _id: &str,
        record: &Value,
    ) -> Result<Value, AdminError> {
        self.check()?;
        self.records.lock().unwrap().push((kind, record.clone()));
        Ok(record.clone())
    }
}
