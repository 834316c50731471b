//! State and pure reducer of the remote sync slice.

use std::fmt;

use exameets_domain::{
    AddQuestionResponse, CreateTestCourseResponse, StudentAnalytics, TestCourse,
};

use super::status::{OperationStatus, Phase};

/// Independently tracked remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKey {
    FetchTests,
    AddQuestion,
    CreateCourse,
    StudentAnalytics,
}

impl OperationKey {
    pub const ALL: [OperationKey; 4] = [
        OperationKey::FetchTests,
        OperationKey::AddQuestion,
        OperationKey::CreateCourse,
        OperationKey::StudentAnalytics,
    ];

    /// Position in [`OperationKey::ALL`].
    pub(crate) fn index(self) -> usize {
        match self {
            OperationKey::FetchTests => 0,
            OperationKey::AddQuestion => 1,
            OperationKey::CreateCourse => 2,
            OperationKey::StudentAnalytics => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKey::FetchTests => "fetch_tests",
            OperationKey::AddQuestion => "add_question",
            OperationKey::CreateCourse => "create_course",
            OperationKey::StudentAnalytics => "student_analytics",
        }
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncState {
    pub fetch_tests: OperationStatus<Vec<TestCourse>>,
    pub add_question: OperationStatus<AddQuestionResponse>,
    pub create_course: OperationStatus<CreateTestCourseResponse>,
    pub student_analytics: OperationStatus<StudentAnalytics>,
}

impl SyncState {
    /// `(is_loading, error, success)` of one operation.
    pub fn flags(&self, key: OperationKey) -> (bool, Option<&str>, bool) {
        macro_rules! flags {
            ($status:expr) => {
                ($status.is_loading, $status.error.as_deref(), $status.success)
            };
        }
        match key {
            OperationKey::FetchTests => flags!(self.fetch_tests),
            OperationKey::AddQuestion => flags!(self.add_question),
            OperationKey::CreateCourse => flags!(self.create_course),
            OperationKey::StudentAnalytics => flags!(self.student_analytics),
        }
    }

    pub fn phase(&self, key: OperationKey) -> Phase {
        match key {
            OperationKey::FetchTests => self.fetch_tests.phase(),
            OperationKey::AddQuestion => self.add_question.phase(),
            OperationKey::CreateCourse => self.create_course.phase(),
            OperationKey::StudentAnalytics => self.student_analytics.phase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncAction {
    Pending(OperationKey),
    Rejected(OperationKey, String),
    TestsFetched(Vec<TestCourse>),
    QuestionAdded(AddQuestionResponse),
    CourseCreated(CreateTestCourseResponse),
    AnalyticsLoaded(StudentAnalytics),
    Reset(OperationKey),
}

impl SyncAction {
    pub fn key(&self) -> OperationKey {
        match self {
            SyncAction::Pending(key) | SyncAction::Rejected(key, _) | SyncAction::Reset(key) => {
                *key
            }
            SyncAction::TestsFetched(_) => OperationKey::FetchTests,
            SyncAction::QuestionAdded(_) => OperationKey::AddQuestion,
            SyncAction::CourseCreated(_) => OperationKey::CreateCourse,
            SyncAction::AnalyticsLoaded(_) => OperationKey::StudentAnalytics,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SyncAction::Pending(_) => "pending",
            SyncAction::Rejected(..) => "rejected",
            SyncAction::Reset(_) => "reset",
            _ => "fulfilled",
        }
    }
}

/// Applies one action. Only the status named by the action's key changes.
pub fn reduce(state: &mut SyncState, action: SyncAction) {
    macro_rules! on_status {
        ($key:expr, |$status:ident| $body:expr) => {
            match $key {
                OperationKey::FetchTests => {
                    let $status = &mut state.fetch_tests;
                    $body
                }
                OperationKey::AddQuestion => {
                    let $status = &mut state.add_question;
                    $body
                }
                OperationKey::CreateCourse => {
                    let $status = &mut state.create_course;
                    $body
                }
                OperationKey::StudentAnalytics => {
                    let $status = &mut state.student_analytics;
                    $body
                }
            }
        };
    }

    match action {
        SyncAction::Pending(key) => on_status!(key, |status| status.start()),
        SyncAction::Rejected(key, message) => on_status!(key, |status| status.reject(message)),
        SyncAction::Reset(key) => on_status!(key, |status| status.reset()),
        SyncAction::TestsFetched(tests) => state.fetch_tests.fulfil(tests),
        SyncAction::QuestionAdded(response) => state.add_question.fulfil(response),
        SyncAction::CourseCreated(response) => state.create_course.fulfil(response),
        SyncAction::AnalyticsLoaded(analytics) => state.student_analytics.fulfil(analytics),
    }
}
