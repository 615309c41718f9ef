//! Upload, analysis, preview and export flows.
//!
//! Each `request_*` method validates locally, marks the flow busy and spawns a
//! task. The task owns the [`BusyGuard`](crate::core::BusyGuard) and hands it
//! back inside its single [`AppEvent`]; the flag clears after the `apply_*`
//! step has run on the UI side, or during unwinding if the task panics.

use std::path::Path;

use crate::core::flows::upload_display_name;
use crate::core::model::{AnalysisResponse, UploadedStory};
use crate::core::{
    AnalysisRequest, FlowError, PreviewBody, PreviewRequest, ToastLevel, analyze_story,
    check_upload_extension, preview_direction, render, upload_story,
};

use super::App;
use super::state::{AppEvent, Focus, UploadStatus};

/// Toast for a story too short to analyze.
pub const INSUFFICIENT_INPUT_TOAST: &str = "Write at least a few sentences first.";

/// Toast for any analysis failure.
pub const ANALYSIS_FAILED_TOAST: &str = "Failed to reach the ghost. Is the server running?";

/// Toast for a file that is not a `.pdf` or `.txt`.
pub const INVALID_FILE_TOAST: &str = "Please upload a .pdf or .txt file";

/// Toast for an upload failure without a reported message.
pub const UPLOAD_FAILED_TOAST: &str = "Upload failed";

/// Toast for export without results.
pub const NOTHING_TO_EXPORT_TOAST: &str = "Nothing to export yet.";

impl App {
    // =========================================================================
    // Upload
    // =========================================================================

    /// Uploads the story file at `path`.
    ///
    /// Files other than `.pdf` and `.txt` are rejected before anything is read
    /// or sent. A second upload while one is in flight is ignored.
    pub(crate) fn request_upload(&mut self, path: &Path) {
        if let Err(e) = check_upload_extension(path) {
            tracing::info!(path = %path.display(), "Upload rejected: {e}");
            self.notifications.show(ToastLevel::Info, INVALID_FILE_TOAST);
            return;
        }

        let Some(guard) = self.upload.busy.try_acquire() else {
            tracing::debug!("Upload already in flight, ignoring");
            return;
        };

        self.upload.status = UploadStatus::Uploading(upload_display_name(path));

        let service = self.service.clone();
        let tx = self.event_sender();
        let path = path.to_path_buf();
        tokio::spawn(async move {
            let result = upload_story(service.as_ref(), &path).await;
            let _ = tx.send(AppEvent::UploadFinished { result, guard }).await;
        });
    }

    pub(super) fn apply_upload(&mut self, result: Result<UploadedStory, FlowError>) {
        match result {
            Ok(story) => {
                self.editors.set_story_text(&story.text);
                self.editors.focus = Focus::Story;
                self.notifications.show(
                    ToastLevel::Success,
                    format!("Story loaded from {}", story.filename),
                );
                self.upload.status = UploadStatus::Loaded(story.filename);
            }
            Err(e) => {
                tracing::warn!("Upload failed: {e}");
                self.upload.status = UploadStatus::Idle;
                self.notifications.show(ToastLevel::Error, upload_failure_message(&e));
            }
        }
    }

    /// Resets the status line of an upload whose task died without a result.
    ///
    /// The guard travels with the result, so an idle flag next to an
    /// `Uploading` status means the task panicked.
    pub(super) fn recover_abandoned_upload(&mut self) {
        if matches!(self.upload.status, UploadStatus::Uploading(_))
            && !self.upload.busy.is_busy()
        {
            tracing::warn!("Upload task ended without a result");
            self.upload.status = UploadStatus::Idle;
            self.notifications.show(ToastLevel::Error, UPLOAD_FAILED_TOAST);
        }
    }

    // =========================================================================
    // Analysis
    // =========================================================================

    /// Sends the editors' contents for analysis.
    ///
    /// A second trigger while an analysis is in flight is dropped. Previous
    /// results are hidden, not cleared, until the new response arrives.
    pub(crate) fn request_analysis(&mut self) {
        let input = self.editors.input_state();
        let request = match AnalysisRequest::from_input(&input) {
            Ok(request) => request,
            Err(e) => {
                tracing::info!("Analysis rejected: {e}");
                self.notifications.show(ToastLevel::Info, INSUFFICIENT_INPUT_TOAST);
                return;
            }
        };

        let Some(guard) = self.analysis.busy.try_acquire() else {
            tracing::debug!("Analysis already in flight, ignoring trigger");
            return;
        };

        self.analysis.results_visible = false;
        if self.editors.focus == Focus::Directions {
            self.editors.focus = Focus::Story;
        }

        let service = self.service.clone();
        let tx = self.event_sender();
        tokio::spawn(async move {
            let result = analyze_story(service.as_ref(), &request).await;
            let _ = tx.send(AppEvent::AnalysisFinished { result, guard }).await;
        });
    }

    pub(super) fn apply_analysis(&mut self, result: Result<AnalysisResponse, FlowError>) {
        match result {
            Ok(response) => {
                let model = render(&response);
                tracing::info!(directions = model.directions.len(), "Results applied");
                self.analysis.results = Some(model);
                self.analysis.results_visible = true;
                self.analysis.selected = 0;
                self.analysis.scroll.reset();
            }
            Err(e) => {
                tracing::warn!("Analysis failed: {e}");
                self.notifications.show(ToastLevel::Error, ANALYSIS_FAILED_TOAST);
            }
        }
    }

    // =========================================================================
    // Preview
    // =========================================================================

    /// Opens the preview modal for the visible card at `index`.
    ///
    /// Never waits for an earlier preview; each call gets a new generation
    /// token and its own request.
    pub(crate) fn request_preview(&mut self, index: usize) {
        let Some(direction) = self
            .analysis
            .visible_results()
            .and_then(|model| model.direction(index))
        else {
            return;
        };

        let request = PreviewRequest {
            story_context: self.editors.input_state().story_context(),
            path_name: direction.name.clone(),
            path_description: direction.description.clone(),
        };
        self.analysis.selected = index;

        let generation = self.preview.open(request.path_name.clone());
        tracing::info!(generation, path = %request.path_name, "Preview requested");

        let service = self.service.clone();
        let tx = self.event_sender();
        tokio::spawn(async move {
            let body = preview_direction(service.as_ref(), &request).await;
            let _ = tx.send(AppEvent::PreviewSettled { generation, body }).await;
        });
    }

    pub(super) fn apply_preview(&mut self, generation: u64, body: PreviewBody) {
        let ordering = self.settings.preview_ordering;
        if self.preview.settle(generation, body, ordering) {
            tracing::debug!(generation, "Preview applied");
        } else {
            tracing::info!(
                generation,
                latest = self.preview.latest_generation(),
                "Discarded stale preview"
            );
        }
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Writes the current results to `.ghostwriter/results.html`.
    pub(crate) fn export_results(&mut self) {
        let Some(model) = self.analysis.results.as_ref() else {
            self.notifications.show(ToastLevel::Info, NOTHING_TO_EXPORT_TOAST);
            return;
        };

        match self.paths.write_results(&model.to_html_document()) {
            Ok(path) => {
                self.notifications.show(
                    ToastLevel::Success,
                    format!("Results exported to {}", path.display()),
                );
            }
            Err(e) => {
                self.notifications
                    .show(ToastLevel::Error, format!("Export failed: {e}"));
            }
        }
    }
}

/// Toast text for an upload failure: the service's message when it reported
/// one, the generic text otherwise.
fn upload_failure_message(error: &FlowError) -> String {
    error
        .reported_message()
        .map_or_else(|| UPLOAD_FAILED_TOAST.to_string(), str::to_string)
}
