use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use exameets_domain::{
    AddQuestionRequest, AddQuestionResponse, CreateTestCourseRequest, CreateTestCourseResponse,
    StudentAnalytics, TestCourse,
};

use super::cancel::CancelToken;
use super::slice::{OperationKey, SyncAction};
use super::store::SyncStore;
use crate::api::ExamApi;
use crate::errors::AdminError;

/// Runs quiz and dashboard operations against an [`ExamApi`], recording
/// each run in a [`SyncStore`].
///
/// Every operation dispatches `pending`, awaits the call, then dispatches
/// `fulfilled` or `rejected`. Failed calls are never retried. Submissions
/// that succeed return to idle once the success dwell has elapsed.
#[derive(Clone)]
pub struct QuizController {
    api: Arc<dyn ExamApi>,
    store: SyncStore,
    success_dwell: Duration,
}

impl QuizController {
    pub fn new(api: Arc<dyn ExamApi>, store: SyncStore, success_dwell: Duration) -> Self {
        Self {
            api,
            store,
            success_dwell,
        }
    }

    pub fn store(&self) -> &SyncStore {
        &self.store
    }

    pub fn success_dwell(&self) -> Duration {
        self.success_dwell
    }

    pub async fn load_tests(&self, token: &CancelToken) -> Result<Vec<TestCourse>, AdminError> {
        let api = Arc::clone(&self.api);
        self.run(
            OperationKey::FetchTests,
            token,
            async move { Ok(api.list_active_tests().await?.tests) },
            SyncAction::TestsFetched,
        )
        .await
        .map(|(tests, _)| tests)
    }

    pub async fn add_question(
        &self,
        request: &AddQuestionRequest,
        token: &CancelToken,
    ) -> Result<AddQuestionResponse, AdminError> {
        let (response, run) = self
            .run(
                OperationKey::AddQuestion,
                token,
                self.api.add_question(request),
                SyncAction::QuestionAdded,
            )
            .await?;
        info!(
            courses = response.added_to_test_courses.len(),
            "question added"
        );
        self.schedule_reset(OperationKey::AddQuestion, run);
        Ok(response)
    }

    pub async fn create_course(
        &self,
        request: &CreateTestCourseRequest,
        token: &CancelToken,
    ) -> Result<CreateTestCourseResponse, AdminError> {
        let (response, run) = self
            .run(
                OperationKey::CreateCourse,
                token,
                self.api.create_test_course(request),
                SyncAction::CourseCreated,
            )
            .await?;
        info!(title = %request.title, "test course created");
        self.schedule_reset(OperationKey::CreateCourse, run);
        Ok(response)
    }

    pub async fn load_analytics(
        &self,
        token: &CancelToken,
    ) -> Result<StudentAnalytics, AdminError> {
        self.run(
            OperationKey::StudentAnalytics,
            token,
            self.api.student_analytics(),
            SyncAction::AnalyticsLoaded,
        )
        .await
        .map(|(analytics, _)| analytics)
    }

    /// Clears the status of `key` by hand, e.g. after a rejection has been
    /// acknowledged.
    pub fn reset(&self, key: OperationKey) {
        self.store.dispatch(SyncAction::Reset(key));
    }

    async fn run<T, Fut>(
        &self,
        key: OperationKey,
        token: &CancelToken,
        call: Fut,
        fulfilled: fn(T) -> SyncAction,
    ) -> Result<(T, u64), AdminError>
    where
        T: Clone,
        Fut: Future<Output = Result<T, AdminError>>,
    {
        let run = self.store.begin(key);
        let result = call.await;
        if token.is_cancelled() {
            info!(operation = %key, "result dropped for abandoned operation");
            self.store.dispatch(SyncAction::Reset(key));
            return Err(AdminError::Cancelled);
        }
        match result {
            Ok(value) => {
                self.store.dispatch(fulfilled(value.clone()));
                Ok((value, run))
            }
            Err(err) => {
                warn!(operation = %key, error = %err, "operation rejected");
                self.store
                    .dispatch(SyncAction::Rejected(key, err.user_message()));
                Err(err)
            }
        }
    }

    fn schedule_reset(&self, key: OperationKey, run: u64) {
        let store = self.store.clone();
        let dwell = self.success_dwell;
        tokio::spawn(async move {
            tokio::time::sleep(dwell).await;
            store.expire_success(key, run);
        });
    }
}
