//! Client side of the Exameets REST API.

mod http;

pub use http::HttpExamApi;

use async_trait::async_trait;
use serde_json::Value;

use exameets_domain::{
    ActiveTestsResponse, AddQuestionRequest, AddQuestionResponse, CreateTestCourseRequest,
    CreateTestCourseResponse, StudentAnalytics,
};

use crate::errors::AdminError;
use crate::records::RecordKind;

/// Operations the admin portal performs against the domain API.
#[async_trait]
pub trait ExamApi: Send + Sync {
    /// `GET /api/tests/active`
    async fn list_active_tests(&self) -> Result<ActiveTestsResponse, AdminError>;

    /// `POST /api/questions`
    async fn add_question(
        &self,
        request: &AddQuestionRequest,
    ) -> Result<AddQuestionResponse, AdminError>;

    /// `POST /api/tests`
    async fn create_test_course(
        &self,
        request: &CreateTestCourseRequest,
    ) -> Result<CreateTestCourseResponse, AdminError>;

    /// `GET /api/admin/students/analytics`
    async fn student_analytics(&self) -> Result<StudentAnalytics, AdminError>;

    /// `POST /api/<resource>`
    async fn create_record(&self, kind: RecordKind, record: &Value) -> Result<Value, AdminError>;

    /// `PUT /api/<resource>/<id>`
    async fn update_record(
        &self,
        kind: RecordKind,
        id: &str,
        record: &Value,
    ) -> Result<Value, AdminError>;
}
