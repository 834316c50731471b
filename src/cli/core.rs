//! Core CLI loop, dispatch, and shell context helpers.

use std::future::Future;
use std::io;

use strsim::levenshtein;
use thiserror::Error;

use exameets_config::ConfigError;

pub use crate::errors::CliError;
use crate::errors::AdminError;

use super::commands::CommandDefinition;
use super::io as cli_io;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Admin(#[from] AdminError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Admin(inner) => CommandError::Admin(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.get(command).map(|entry| entry.handler) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Admin(err) => {
                self.print_error(&err.user_message());
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }

    /// Runs an async operation to completion on the shell's runtime.
    pub(crate) fn block_on<T>(&self, future: impl Future<Output = T>) -> T {
        self.runtime.block_on(future)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    use exameets_config::{Config, ConfigManager};
    use exameets_domain::{
        ActiveTestsResponse, AddQuestionRequest, AddQuestionResponse, CreateTestCourseRequest,
        CreateTestCourseResponse, StudentAnalytics, StudentSummary, TestCourse,
    };

    use super::*;
    use crate::api::ExamApi;
    use crate::records::RecordKind;

    /// Calls received by [`RecordingApi`].
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Create(RecordKind, Value),
        Update(RecordKind, String, Value),
        Question(AddQuestionRequest),
        Course(CreateTestCourseRequest),
    }

    #[derive(Default)]
    pub(crate) struct RecordingApi {
        pub calls: Mutex<Vec<Call>>,
    }

    #[async_trait]
    impl ExamApi for RecordingApi {
        async fn list_active_tests(&self) -> Result<ActiveTestsResponse, AdminError> {
            Ok(ActiveTestsResponse {
                success: true,
                tests: vec![TestCourse {
                    id: Some("t1".into()),
                    title: "Mock 1".into(),
                    duration_minutes: 60,
                    total_marks: 100,
                    ..TestCourse::default()
                }],
            })
        }

        async fn add_question(
            &self,
            request: &AddQuestionRequest,
        ) -> Result<AddQuestionResponse, AdminError> {
            self.calls.lock().unwrap().push(Call::Question(request.clone()));
            Ok(AddQuestionResponse {
                added_to_test_courses: request.test_course_ids.clone(),
            })
        }

        async fn create_test_course(
            &self,
            request: &CreateTestCourseRequest,
        ) -> Result<CreateTestCourseResponse, AdminError> {
            self.calls.lock().unwrap().push(Call::Course(request.clone()));
            Ok(CreateTestCourseResponse {
                success: true,
                ..CreateTestCourseResponse::default()
            })
        }

        async fn student_analytics(&self) -> Result<StudentAnalytics, AdminError> {
            Ok(StudentAnalytics {
                total_students: 1,
                students: vec![StudentSummary {
                    id: "s1".into(),
                    name: "Anita".into(),
                    ..StudentSummary::default()
                }],
                ..StudentAnalytics::default()
            })
        }

        async fn create_record(
            &self,
            kind: RecordKind,
            record: &Value,
        ) -> Result<Value, AdminError> {
            self.calls.lock().unwrap().push(Call::Create(kind, record.clone()));
            Ok(json!({"_id": "new-1"}))
        }

        async fn update_record(
            &self,
            kind: RecordKind,
            id: &str,
            record: &Value,
        ) -> Result<Value, AdminError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Update(kind, id.to_string(), record.clone()));
            Ok(record.clone())
        }
    }

    pub(crate) struct Harness {
        pub context: ShellContext,
        pub api: Arc<RecordingApi>,
        _home: TempDir,
    }

    impl Harness {
        pub fn line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
            crate::cli::shell::handle_line(&mut self.context, line)
        }

        pub fn run(&mut self, lines: &[&str]) {
            for line in lines {
                match self.line(line) {
                    Ok(LoopControl::Exit) => break,
                    Ok(LoopControl::Continue) => {}
                    Err(err) => panic!("`{line}` failed: {err}"),
                }
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.api.calls.lock().unwrap().clone()
        }
    }

    pub(crate) fn harness(role: Option<&str>) -> Harness {
        let home = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(home.path().to_path_buf()).expect("manager");
        let mut config = Config::default();
        config.session.role = role.map(String::from);
        config.ui_color_enabled = false;
        let api = Arc::new(RecordingApi::default());
        let context = ShellContext::with_api(
            CliMode::Script,
            manager,
            config,
            Arc::clone(&api) as Arc<dyn ExamApi>,
        )
        .expect("context");
        Harness {
            context,
            api,
            _home: home,
        }
    }
}
