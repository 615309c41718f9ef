//! Upload, analysis and preview flows.
//!
//! Each flow validates locally, makes at most one service call and returns a
//! value. Applying the outcome to the view is left to the app.

use std::path::Path;

use crate::core::FlowError;
use crate::core::input::AnalysisRequest;
use crate::core::model::{AnalysisResponse, PreviewRequest, UploadFile, UploadedStory};
use crate::core::preview::PreviewBody;
use crate::service::StoryService;

/// File extensions the upload endpoint accepts.
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

/// Checks that `path` names a `.pdf` or `.txt` file.
///
/// Only the final extension counts and case is ignored, so `Notes.TXT` passes
/// and `notes.txt.bak` does not.
///
/// # Errors
///
/// Returns [`FlowError::InvalidFileType`] with the offending extension (empty
/// when the name has none).
pub fn check_upload_extension(path: &Path) -> Result<(), FlowError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(FlowError::InvalidFileType { extension })
    }
}

/// Display name for an upload: the final path component.
#[must_use]
pub fn upload_display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Validates, reads and uploads the story file at `path`.
///
/// # Errors
///
/// Returns [`FlowError::InvalidFileType`] before touching the file or the
/// network, [`FlowError::TransportError`] when the file cannot be read, and
/// whatever the service reports otherwise.
pub async fn upload_story(
    service: &dyn StoryService,
    path: &Path,
) -> Result<UploadedStory, FlowError> {
    check_upload_extension(path)?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| FlowError::TransportError(format!("cannot read {}: {e}", path.display())))?;
    let filename = upload_display_name(path);
    tracing::info!(%filename, bytes = bytes.len(), "upload started");

    let story = service.upload(UploadFile { filename, bytes }).await?;
    tracing::info!(filename = %story.filename, chars = story.text.len(), "upload finished");
    Ok(story)
}

/// Sends an already validated analysis request.
///
/// # Errors
///
/// Propagates the service's [`FlowError`].
pub async fn analyze_story(
    service: &dyn StoryService,
    request: &AnalysisRequest,
) -> Result<AnalysisResponse, FlowError> {
    tracing::info!(chars = request.last_paragraph.chars().count(), "analysis started");
    let response = service.analyze(request).await?;
    tracing::info!(
        directions = response.directions.as_ref().map_or(0, Vec::len),
        "analysis finished"
    );
    Ok(response)
}

/// Requests a preview and resolves it into the modal body.
///
/// Never fails: a missing or empty preview becomes [`PreviewBody::Empty`] and
/// any error becomes [`PreviewBody::Failed`].
pub async fn preview_direction(service: &dyn StoryService, request: &PreviewRequest) -> PreviewBody {
    match service.expand(request).await {
        Ok(result) => match result.preview.filter(|text| !text.is_empty()) {
            Some(text) => PreviewBody::Text(text),
            None => PreviewBody::Empty,
        },
        Err(e) => {
            tracing::warn!(path = %request.path_name, error = %e, "preview failed");
            PreviewBody::Failed
        }
    }
}
