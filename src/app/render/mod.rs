//! Rendering methods for the App.
//!
//! This module contains all UI rendering logic:
//! - **Compose view**: Header, editors, results panel, status line, footer
//! - **Upload prompt** and **Settings panel**: Mode overlays
//! - **Preview modal** and **toast**: Drawn above everything else

mod compose;
mod overlays;
mod settings;

use ratatui::Frame;

use super::{App, AppMode};

impl App {
    /// Renders the application UI.
    ///
    /// The compose view is always drawn as the base layer. Mode overlays go
    /// on top of it, then the preview modal, then the toast.
    pub fn render(&self, frame: &mut Frame) {
        self.render_compose(frame);

        match self.mode {
            AppMode::Compose => {}
            AppMode::UploadPrompt => self.render_upload_prompt(frame),
            AppMode::Settings => self.render_settings(frame),
        }

        if self.preview.is_visible() {
            self.render_preview(frame);
        }

        self.render_toast(frame);
    }
}
