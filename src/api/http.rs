use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use exameets_config::Config;
use exameets_domain::{
    ActiveTestsResponse, AddQuestionRequest, AddQuestionResponse, ApiMessage,
    CreateTestCourseRequest, CreateTestCourseResponse, StudentAnalytics,
};

use super::ExamApi;
use crate::errors::AdminError;
use crate::records::RecordKind;

/// [`ExamApi`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpExamApi {
    base_url: String,
    auth_token: Option<String>,
    client: Client,
}

impl HttpExamApi {
    pub fn new(
        base_url: &str,
        auth_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, AdminError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: auth_token.map(String::from),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AdminError> {
        Self::new(
            &config.api_base_url,
            config.session.auth_token.as_deref(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AdminError> {
        info!(path, "GET");
        let response = self.request(Method::GET, path).send().await?;
        read_body(path, response).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, AdminError> {
        info!(path, %method, "sending");
        let response = self.request(method, path).json(body).send().await?;
        read_body(path, response).await
    }
}

/// Decodes a 2xx body, or turns the response into [`AdminError::Api`]
/// carrying the server's `message` when it sent one.
async fn read_body<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, AdminError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if status.is_success() {
        return Ok(serde_json::from_slice(&bytes)?);
    }
    let message = serde_json::from_slice::<ApiMessage>(&bytes)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
    warn!(path, status = status.as_u16(), %message, "request rejected");
    Err(AdminError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ExamApi for HttpExamApi {
    async fn list_active_tests(&self) -> Result<ActiveTestsResponse, AdminError> {
        self.get("/api/tests/active").await
    }

    async fn add_question(
        &self,
        request: &AddQuestionRequest,
    ) -> Result<AddQuestionResponse, AdminError> {
        self.send_json(Method::POST, "/api/questions", request).await
    }

    async fn create_test_course(
        &self,
        request: &CreateTestCourseRequest,
    ) -> Result<CreateTestCourseResponse, AdminError> {
        self.send_json(Method::POST, "/api/tests", request).await
    }

    async fn student_analytics(&self) -> Result<StudentAnalytics, AdminError> {
        self.get("/api/admin/students/analytics").await
    }

    async fn create_record(&self, kind: RecordKind, record: &Value) -> Result<Value, AdminError> {
        let path = format!("/api/{}", kind.resource());
        self.send_json(Method::POST, &path, record).await
    }

    async fn update_record(
        &self,
        kind: RecordKind,
        id: &str,
        record: &Value,
    ) -> Result<Value, AdminError> {
        let path = format!("/api/{}/{}", kind.resource(), id);
        self.send_json(Method::PUT, &path, record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let api = HttpExamApi::new("http://localhost:5000/", None, Duration::from_secs(5)).unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000");
    }

    #[test]
    fn from_config_uses_configured_base_url() {
        let config = Config {
            api_base_url: "https://api.exameets.example".into(),
            ..Config::default()
        };
        let api = HttpExamApi::from_config(&config).unwrap();
        assert_eq!(api.base_url(), "https://api.exameets.example");
    }
}
