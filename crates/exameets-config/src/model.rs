use serde::{Deserialize, Serialize};

/// Stores operator-configurable endpoints and preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "Config::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How long a success banner stays up before the operation resets.
    #[serde(default = "Config::default_success_dwell_ms")]
    pub success_dwell_ms: u64,
    #[serde(default = "Config::default_login_route")]
    pub login_route: String,
    #[serde(default)]
    pub media: MediaSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Extra `tracing` filter directives, e.g. `exameets_admin=debug`.
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::default_api_base_url(),
            request_timeout_secs: Self::default_request_timeout_secs(),
            success_dwell_ms: Self::default_success_dwell_ms(),
            login_route: Self::default_login_route(),
            media: MediaSettings::default(),
            session: SessionSettings::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            log_filter: None,
        }
    }
}

impl Config {
    pub const API_URL_ENV: &'static str = "EXAMEETS_API_URL";

    pub fn default_api_base_url() -> String {
        "http://localhost:5000".into()
    }

    pub fn default_request_timeout_secs() -> u64 {
        30
    }

    pub fn default_success_dwell_ms() -> u64 {
        3_000
    }

    pub fn default_login_route() -> String {
        "/login".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Applies environment overrides on top of the persisted values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(Self::API_URL_ENV) {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                self.api_base_url = trimmed.trim_end_matches('/').to_string();
            }
        }
    }
}

/// Credentials for the third-party media host used for images and certificates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MediaSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Full upload endpoint. Derived from `cloud_name` when absent.
    pub upload_url: Option<String>,
    #[serde(default)]
    pub cloud_name: String,
    #[serde(default)]
    pub upload_preset: String,
}

impl MediaSettings {
    pub fn resolve_upload_url(&self) -> String {
        match &self.upload_url {
            Some(url) => url.clone(),
            None => format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                self.cloud_name
            ),
        }
    }
}

/// Principal the shell acts as. The token is sent as a bearer credential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SessionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}
