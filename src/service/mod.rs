//! Client side of the story service.
//!
//! The app talks to the service only through [`StoryService`], so flows can be
//! driven by scripted implementations in tests.

mod http;

use async_trait::async_trait;

use crate::core::FlowError;
use crate::core::input::AnalysisRequest;
use crate::core::model::{AnalysisResponse, PreviewRequest, PreviewResult, UploadFile, UploadedStory};

pub use http::{ANALYZE_PATH, EXPAND_PATH, HttpStoryService, UPLOAD_PATH, decode_upload_reply};

/// The three endpoints of the story service.
#[async_trait]
pub trait StoryService: Send + Sync {
    /// Uploads a story file and returns the extracted text.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::RemoteError`] when the service rejects the file or
    /// answers with a non-success status, [`FlowError::TransportError`] when
    /// the request or the reply cannot be completed.
    async fn upload(&self, file: UploadFile) -> Result<UploadedStory, FlowError>;

    /// Requests an analysis of the story.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::RemoteError`] on a non-success status and
    /// [`FlowError::TransportError`] on network failure or a malformed reply.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, FlowError>;

    /// Requests a short preview of one direction.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::TransportError`] on network failure or when the
    /// reply is not a JSON object.
    async fn expand(&self, request: &PreviewRequest) -> Result<PreviewResult, FlowError>;
}
