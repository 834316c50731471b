use std::sync::Arc;
use std::time::Duration;

use dialoguer::theme::ColorfulTheme;
use tokio::runtime::Runtime;

use exameets_config::{Config, ConfigManager};

use crate::api::{ExamApi, HttpExamApi};
use crate::auth::{AuthContext, SessionAuth};
use crate::errors::CliError;
use crate::forms::SubmissionGate;
use crate::sync::{QuizController, SyncStore};

use super::commands::{self, CommandRegistry};
use super::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach: configuration, the acting
/// principal, the API client and the sync slice it reports into.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub auth: SessionAuth,
    pub gate: SubmissionGate,
    pub api: Arc<dyn ExamApi>,
    pub quiz: QuizController,
    pub runtime: Runtime,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::from_env()?;
        let config = config_manager.load()?;
        let api = HttpExamApi::from_config(&config)?;
        Self::with_api(mode, config_manager, config, Arc::new(api))
    }

    /// Builds a context around an existing API client.
    pub fn with_api(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        api: Arc<dyn ExamApi>,
    ) -> Result<Self, CliError> {
        output::set_color_enabled(config.ui_color_enabled);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let quiz = QuizController::new(
            Arc::clone(&api),
            SyncStore::new(),
            Duration::from_millis(config.success_dwell_ms),
        );
        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            auth: SessionAuth::from_settings(&config.session),
            gate: SubmissionGate::new(config.login_route.clone()),
            config_manager,
            config,
            api,
            quiz,
            runtime,
            running: true,
        })
    }

    /// Rebuilds everything derived from the configuration after it changed.
    pub(crate) fn refresh_from_config(&mut self) -> Result<(), CliError> {
        output::set_color_enabled(self.config.ui_color_enabled);
        self.auth = SessionAuth::from_settings(&self.config.session);
        self.gate = SubmissionGate::new(self.config.login_route.clone());
        self.api = Arc::new(HttpExamApi::from_config(&self.config)?);
        self.quiz = QuizController::new(
            Arc::clone(&self.api),
            self.quiz.store().clone(),
            Duration::from_millis(self.config.success_dwell_ms),
        );
        Ok(())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        match self.auth.principal() {
            Some(principal) => format!("exameets({}@{})> ", principal.user_id, principal.role),
            None => "exameets> ".to_string(),
        }
    }
}
