use thiserror::Error;

use exameets_config::ConfigError;

/// Error type shared by the API, media and sync layers.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Network error: {0}")]
    Http(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Upload failed: {0}")]
    Upload(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Operation abandoned")]
    Cancelled,
}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        AdminError::Http(err.to_string())
    }
}

impl AdminError {
    /// Message suitable for an error banner: the server's own message when
    /// there is one, the transport error otherwise.
    pub fn user_message(&self) -> String {
        match self {
            AdminError::Api { message, .. } => message.clone(),
            AdminError::Http(message) | AdminError::Upload(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Failure that ends the operator shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Admin(#[from] AdminError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Admin(AdminError::from(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Admin(AdminError::from(err))
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}
