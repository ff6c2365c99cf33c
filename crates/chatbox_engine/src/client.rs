use std::time::Duration;

use chatbox_logging::chatbox_debug;
use reqwest::multipart::Form;
use url::Url;

use crate::wire::{decode_ask, decode_upload};
use crate::{AskReply, BackendError, FailureKind, UploadFile, UploadReply};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub ask_path: String,
    pub upload_path: String,
    /// `None` leaves connection failures to the transport.
    pub connect_timeout: Option<Duration>,
    /// Whole-request limit; `None` leaves termination to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            ask_path: "/ask/".to_string(),
            upload_path: "/upload-file/".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

impl BackendSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn ask_url(&self) -> Result<Url, BackendError> {
        self.endpoint(&self.ask_path)
    }

    pub fn upload_url(&self) -> Result<Url, BackendError> {
        self.endpoint(&self.upload_path)
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined)
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, format!("{joined}: {err}")))
    }
}

#[async_trait::async_trait]
pub trait BackendClient: Send + Sync {
    async fn ask(&self, question: &str) -> Result<AskReply, BackendError>;

    async fn upload(&self, file: UploadFile) -> Result<UploadReply, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackendClient {
    settings: BackendSettings,
    client: reqwest::Client,
}

impl ReqwestBackendClient {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn post_form(&self, url: Url, form: Form) -> Result<Vec<u8>, BackendError> {
        chatbox_debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl BackendClient for ReqwestBackendClient {
    async fn ask(&self, question: &str) -> Result<AskReply, BackendError> {
        let url = self.settings.ask_url()?;
        let form = Form::new().text("question", question.to_string());
        let body = self.post_form(url, form).await?;
        decode_ask(&body)
    }

    async fn upload(&self, file: UploadFile) -> Result<UploadReply, BackendError> {
        let url = self.settings.upload_url()?;
        let form = Form::new().part("file", file.into_part().await?);
        let body = self.post_form(url, form).await?;
        decode_upload(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return BackendError::new(FailureKind::MalformedBody, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}
