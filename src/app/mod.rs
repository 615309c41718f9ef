//! Main application state and logic.
//!
//! This module contains the core App struct and its implementation,
//! organized into submodules:
//! - `state` - Application state structures
//! - `events` - Key, paste and mouse handling
//! - `actions` - Upload, analysis, preview and export flows
//! - `layout` - Panel geometry
//! - `render` - UI rendering
//!
//! ## Application Modes
//!
//! - **`Compose`**: Three editors on the left, the results panel on the right.
//! - **`UploadPrompt`**: Path prompt overlay for loading a story (Ctrl+O)
//! - **`Settings`**: Modal overlay panel (Ctrl+S)
//!
//! The preview modal and toasts are drawn on top of whichever mode is active.
//!
//! ## Request model
//!
//! Every network round-trip runs in a spawned task that sends exactly one
//! [`AppEvent`] back. [`App::process_events`] drains the channel once per
//! frame and performs all visible mutation, so the UI never blocks.

mod actions;
pub mod events;
mod layout;
mod render;
pub mod state;

#[cfg(test)]
mod tests;

pub use layout::{
    ComposeLayout, calculate_compose_layout, centered_rect, preview_modal_area,
    upload_prompt_area,
};

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::cli::Args;
use crate::core::{Notifications, PreviewModal, ToastLevel};
use crate::fs::{GhostwriterPaths, ServiceConfig};
use crate::service::{HttpStoryService, StoryService};
use crate::tui::Theme;

pub use self::state::{
    AnalysisUiState, AppEvent, AppMode, EditorState, Focus, LayoutState, SettingsItem,
    SettingsState, UploadStatus, UploadUiState,
};

/// Channel buffer size for request events.
const EVENT_CHANNEL_SIZE: usize = 64;

/// Main application state.
///
/// Organized into component sub-structs:
/// - `editors`: The three text fields and focus
/// - `analysis`: Busy flag, rendered results, card selection
/// - `upload`: Busy flag, status line, path prompt
/// - `preview`: Preview modal and its generation token
/// - `layout`: Areas cached each frame
pub struct App {
    // =========================================================================
    // Shared State
    // =========================================================================
    /// All ghostwriter-related filesystem paths.
    pub(crate) paths: GhostwriterPaths,
    /// Resolved service address and timeout.
    pub(crate) config: ServiceConfig,
    /// Theme for styling.
    pub(crate) theme: Theme,
    /// Current application mode.
    pub(crate) mode: AppMode,
    /// Should quit flag.
    should_quit: bool,
    /// The story service.
    service: Arc<dyn StoryService>,

    // =========================================================================
    // Event Channels
    // =========================================================================
    /// Event receiver for request results.
    event_rx: mpsc::Receiver<AppEvent>,
    /// Event sender (cloned into request tasks).
    event_tx: mpsc::Sender<AppEvent>,

    // =========================================================================
    // Component States
    // =========================================================================
    /// Editors and focus.
    pub(crate) editors: EditorState,
    /// Analysis state and results.
    pub(crate) analysis: AnalysisUiState,
    /// Upload state.
    pub(crate) upload: UploadUiState,
    /// Preview modal.
    pub(crate) preview: PreviewModal,
    /// Toasts.
    pub(crate) notifications: Notifications,
    /// Settings panel state.
    pub(crate) settings: SettingsState,
    /// Areas cached each frame.
    pub(crate) layout: LayoutState,
}

impl App {
    /// Creates the application from command line arguments.
    ///
    /// Settings are read from `.ghostwriter/settings.json` in the current
    /// directory; a broken file falls back to defaults with a warning toast.
    /// If `args.input_file` is set, its upload starts immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is unavailable or the HTTP
    /// client cannot be built.
    pub fn new(args: &Args) -> Result<Self> {
        let paths = GhostwriterPaths::from_cwd()?;

        let (persisted, load_error) = match paths.load_settings() {
            Ok(persisted) => (persisted, None),
            Err(e) => {
                tracing::warn!("Failed to load settings: {e:#}");
                (crate::fs::PersistedSettings::default(), Some(e))
            }
        };

        let config = ServiceConfig::resolve(args.server.as_deref(), args.timeout, &persisted);
        tracing::info!(
            server = %config.server_url,
            timeout_secs = config.request_timeout.as_secs(),
            "Service configured"
        );
        let service = HttpStoryService::new(&config.server_url, config.request_timeout)?;

        let mut app = Self::new_with_service(paths, config, Arc::new(service));
        persisted.apply_to(&mut app.settings);
        if let Some(e) = load_error {
            app.notifications
                .show(ToastLevel::Error, format!("Failed to load settings: {e}"));
        }

        if let Some(path) = &args.input_file {
            app.request_upload(path);
        }

        Ok(app)
    }

    /// Creates an application around an explicit service.
    ///
    /// Used by tests with scripted services and isolated temporary
    /// directories. Persisted settings are not read.
    #[must_use]
    pub fn new_with_service(
        paths: GhostwriterPaths,
        config: ServiceConfig,
        service: Arc<dyn StoryService>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);

        Self {
            paths,
            config,
            theme: Theme::default(),
            mode: AppMode::default(),
            should_quit: false,
            service,
            event_rx,
            event_tx,
            editors: EditorState::default(),
            analysis: AnalysisUiState::default(),
            upload: UploadUiState::default(),
            preview: PreviewModal::default(),
            notifications: Notifications::default(),
            settings: SettingsState::default(),
            layout: LayoutState::default(),
        }
    }

    /// Returns true if the application should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Gets the event sender for request tasks.
    #[must_use]
    pub fn event_sender(&self) -> mpsc::Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Returns the ghostwriter paths.
    #[must_use]
    pub fn paths(&self) -> &GhostwriterPaths {
        &self.paths
    }

    /// Calculates and caches the layout based on terminal dimensions.
    ///
    /// Should be called once per frame before rendering. Mouse handling and
    /// scroll bounds read the cached values.
    pub fn update_layout(&mut self, terminal_area: Rect) {
        self.layout.compose = calculate_compose_layout(terminal_area);
        self.layout.preview_modal = preview_modal_area(terminal_area);
    }

    /// Processes periodic tasks: expires toasts.
    pub fn tick(&mut self) {
        self.notifications.expire(Instant::now());
    }
}
