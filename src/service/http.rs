//! `reqwest` implementation of [`StoryService`].

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::StoryService;
use crate::core::FlowError;
use crate::core::input::AnalysisRequest;
use crate::core::model::{
    AnalysisResponse, PreviewRequest, PreviewResult, UploadFile, UploadReply, UploadedStory,
};

/// Upload endpoint (multipart, field `file`).
pub const UPLOAD_PATH: &str = "/api/upload";

/// Analysis endpoint (JSON).
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Preview endpoint (JSON).
pub const EXPAND_PATH: &str = "/api/expand";

/// Story service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStoryService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStoryService {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ghostwriter/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl StoryService for HttpStoryService {
    async fn upload(&self, file: UploadFile) -> Result<UploadedStory, FlowError> {
        let url = self.endpoint(UPLOAD_PATH);
        tracing::debug!(%url, filename = %file.filename, bytes = file.bytes.len(), "uploading story");

        let part = Part::bytes(file.bytes)
            .file_name(file.filename.clone())
            .mime_str(mime_for(&file.filename))?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%url, %status, "upload replied");

        decode_upload_reply(status.as_u16(), status.is_success(), &body, &file.filename)
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, FlowError> {
        let url = self.endpoint(ANALYZE_PATH);
        tracing::debug!(%url, chars = request.last_paragraph.len(), "requesting analysis");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        tracing::debug!(%url, %status, "analysis replied");
        if !status.is_success() {
            return Err(FlowError::RemoteError {
                status: status.as_u16(),
                message: None,
            });
        }

        Ok(response.json::<AnalysisResponse>().await?)
    }

    async fn expand(&self, request: &PreviewRequest) -> Result<PreviewResult, FlowError> {
        let url = self.endpoint(EXPAND_PATH);
        tracing::debug!(%url, path = %request.path_name, "requesting preview");

        let response = self.client.post(&url).json(request).send().await?;
        tracing::debug!(%url, status = %response.status(), "preview replied");

        // The body decides the outcome, not the status: a JSON error reply
        // without a preview shows the empty-preview text.
        Ok(response.json::<PreviewResult>().await?)
    }
}

fn mime_for(filename: &str) -> &'static str {
    if filename.to_ascii_lowercase().ends_with(".pdf") {
        "application/pdf"
    } else {
        "text/plain"
    }
}

/// Interprets the body of an upload reply.
///
/// A reported `error` wins over everything else. `fallback_filename` is used
/// when the service does not echo the file name.
///
/// # Errors
///
/// Returns [`FlowError::RemoteError`] for a reported error or a non-success
/// status, and [`FlowError::TransportError`] when a success reply is not
/// valid JSON or carries no text.
pub fn decode_upload_reply(
    status: u16,
    success: bool,
    body: &str,
    fallback_filename: &str,
) -> Result<UploadedStory, FlowError> {
    let reply = match serde_json::from_str::<UploadReply>(body) {
        Ok(reply) => reply,
        Err(_) if !success => {
            return Err(FlowError::RemoteError {
                status,
                message: None,
            });
        }
        Err(e) => return Err(FlowError::TransportError(format!("malformed upload reply: {e}"))),
    };

    if let Some(message) = reply.error.filter(|m| !m.is_empty()) {
        return Err(FlowError::RemoteError {
            status,
            message: Some(message),
        });
    }
    if !success {
        return Err(FlowError::RemoteError {
            status,
            message: None,
        });
    }

    let text = reply
        .text
        .ok_or_else(|| FlowError::TransportError("upload reply carried no text".to_string()))?;
    let filename = reply
        .filename
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| fallback_filename.to_string());

    Ok(UploadedStory { text, filename })
}
