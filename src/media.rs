//! Uploads to the third-party media host and writes the returned URL into
//! a form field.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use exameets_config::MediaSettings;

use crate::errors::AdminError;
use crate::forms::{FieldId, FieldKind, FormStore, ScalarKind};
use crate::sync::CancelToken;

/// File handed to a [`MediaUploader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, AdminError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, bytes })
    }
}

#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Uploads the file and returns its durable secure URL.
    async fn upload(&self, file: UploadFile) -> Result<String, AdminError>;
}

/// Multipart uploader for a Cloudinary-style unsigned upload endpoint.
#[derive(Debug, Clone)]
pub struct HttpMediaUploader {
    client: Client,
    upload_url: String,
    cloud_name: String,
    upload_preset: String,
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    secure_url: Option<String>,
    error: Option<UploadFailure>,
}

#[derive(Debug, Deserialize)]
struct UploadFailure {
    message: String,
}

impl HttpMediaUploader {
    pub fn from_settings(settings: &MediaSettings, timeout: Duration) -> Result<Self, AdminError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AdminError::Upload(err.to_string()))?;
        Ok(Self {
            client,
            upload_url: settings.resolve_upload_url(),
            cloud_name: settings.cloud_name.clone(),
            upload_preset: settings.upload_preset.clone(),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

#[async_trait]
impl MediaUploader for HttpMediaUploader {
    async fn upload(&self, file: UploadFile) -> Result<String, AdminError> {
        info!(file = %file.file_name, size = file.bytes.len(), "uploading media");
        let part = Part::bytes(file.bytes).file_name(file.file_name);
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("cloud_name", self.cloud_name.clone());

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| AdminError::Upload(err.to_string()))?;
        let status = response.status();
        let reply: UploadReply = response
            .json()
            .await
            .map_err(|err| AdminError::Upload(err.to_string()))?;

        match (status.is_success(), reply) {
            (
                true,
                UploadReply {
                    secure_url: Some(url),
                    ..
                },
            ) => Ok(url),
            (_, UploadReply { error: Some(failure), .. }) => {
                warn!(status = status.as_u16(), message = %failure.message, "upload rejected");
                Err(AdminError::Upload(failure.message))
            }
            _ => Err(AdminError::Upload(format!(
                "media host answered {status} without a secure URL"
            ))),
        }
    }
}

/// Uploads `file` and stores the URL in `field`: a text field takes the URL
/// as its value, a string list gets it appended.
///
/// On failure or cancellation the form is left untouched.
pub async fn upload_into<F: FieldId>(
    store: &mut FormStore<F>,
    field: F,
    uploader: &dyn MediaUploader,
    file: UploadFile,
    token: &CancelToken,
) -> Result<String, AdminError> {
    let accepts_url = matches!(
        store.schema().kind(field),
        Some(FieldKind::Scalar(ScalarKind::Text)) | Some(FieldKind::StringList)
    );
    if !accepts_url {
        return Err(AdminError::Validation(format!(
            "{} cannot hold an uploaded file",
            field.label()
        )));
    }

    let url = uploader.upload(file).await?;
    if token.is_cancelled() {
        info!(field = field.key(), "upload finished after the form closed; discarded");
        return Err(AdminError::Cancelled);
    }

    if store.schema().kind(field) == Some(&FieldKind::StringList) {
        store.append_list_item(field, &url);
    } else {
        store.set_scalar(field, url.as_str());
    }
    Ok(url)
}
