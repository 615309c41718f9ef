//! Application state structures.
//!
//! - **`EditorState`**: the three text fields and keyboard focus
//! - **`AnalysisUiState`**: busy flag, rendered results, card selection and scroll
//! - **`UploadUiState`**: busy flag, status line and the path prompt
//! - **`SettingsState`**: the settings panel
//! - **`LayoutState`**: areas cached once per frame

use tui_textarea::{CursorMove, TextArea};

use crate::core::model::{AnalysisResponse, UploadedStory};
use crate::core::{BusyFlag, BusyGuard, FlowError, InputState, PreviewBody, PreviewOrdering, TextCounts, UiModel};

/// Label of the analysis trigger while idle.
pub const SUMMON_LABEL: &str = "Summon Ghost";

/// Label of the analysis trigger while a request is in flight.
pub const ANALYZING_LABEL: &str = "Analyzing...";

/// Upload status shown when no upload is running or loaded.
pub const UPLOAD_HINT: &str = "Press Ctrl+O to load a .pdf or .txt";

const STORY_PLACEHOLDER: &str = "Start writing, or press Ctrl+O to load a story...";
const LONG_CONTEXT_PLACEHOLDER: &str = "Optional: earlier chapters, outline, world notes";
const SHORT_MEMORY_PLACEHOLDER: &str = "Optional: what just happened";
const UPLOAD_PROMPT_PLACEHOLDER: &str = "path/to/story.txt";

/// Application mode.
///
/// The preview modal is not a mode: it is driven by
/// [`PreviewModal`](crate::core::PreviewModal) visibility so that preview
/// results keep arriving while other overlays come and go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Editing and browsing results.
    #[default]
    Compose,
    /// Typing the path of a file to upload (Ctrl+O).
    UploadPrompt,
    /// Settings panel overlay (Ctrl+S).
    Settings,
}

/// Which panel receives key input in compose mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The story editor.
    #[default]
    Story,
    /// The long context editor.
    LongContext,
    /// The short memory editor.
    ShortMemory,
    /// The direction cards in the results panel.
    Directions,
}

impl Focus {
    /// Next panel in Tab order. Directions is skipped when there are none.
    #[must_use]
    pub const fn next(self, has_directions: bool) -> Self {
        match self {
            Self::Story => Self::LongContext,
            Self::LongContext => Self::ShortMemory,
            Self::ShortMemory if has_directions => Self::Directions,
            Self::ShortMemory | Self::Directions => Self::Story,
        }
    }

    /// Previous panel in Tab order.
    #[must_use]
    pub const fn prev(self, has_directions: bool) -> Self {
        match self {
            Self::Story if has_directions => Self::Directions,
            Self::Story => Self::ShortMemory,
            Self::LongContext => Self::Story,
            Self::ShortMemory => Self::LongContext,
            Self::Directions => Self::ShortMemory,
        }
    }

    /// Returns true for the three text editors.
    #[must_use]
    pub const fn is_editor(self) -> bool {
        !matches!(self, Self::Directions)
    }
}

/// Identifiers for settings items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    /// How overlapping preview responses are applied.
    PreviewOrdering,
    /// Service base URL (read-only).
    ServerUrl,
    /// Request timeout (read-only).
    RequestTimeout,
}

impl SettingsItem {
    /// Returns all settings items in display order.
    #[must_use]
    pub fn all() -> &'static [SettingsItem] {
        &[
            SettingsItem::PreviewOrdering,
            SettingsItem::ServerUrl,
            SettingsItem::RequestTimeout,
        ]
    }

    /// Returns the display label for this item.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PreviewOrdering => "Preview Ordering",
            Self::ServerUrl => "Server",
            Self::RequestTimeout => "Timeout",
        }
    }

    /// Returns a description for this item.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PreviewOrdering => "Arrival shows every reply; Latest keeps the newest request",
            Self::ServerUrl => "Set with --server or GHOSTWRITER_SERVER",
            Self::RequestTimeout => "Set with --timeout",
        }
    }

    /// Returns true if Enter changes this item.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::PreviewOrdering)
    }
}

/// Results sent from spawned request tasks back to the UI.
///
/// Upload and analysis results carry the flow's [`BusyGuard`], so the flow
/// stays busy until the result has been applied.
#[derive(Debug)]
pub enum AppEvent {
    /// An upload completed.
    UploadFinished {
        /// Extracted story or the failure.
        result: Result<UploadedStory, FlowError>,
        /// Released once the result is applied.
        guard: BusyGuard,
    },
    /// An analysis completed.
    AnalysisFinished {
        /// Service reply or the failure.
        result: Result<AnalysisResponse, FlowError>,
        /// Released once the result is applied.
        guard: BusyGuard,
    },
    /// A preview request completed.
    PreviewSettled {
        /// Token handed out when the preview was opened.
        generation: u64,
        /// What the modal should show.
        body: PreviewBody,
    },
}

/// Normalizes externally supplied text before it enters an editor.
///
/// Line endings become `\n`; other control characters, tabs included, are
/// dropped because they corrupt the terminal display.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect()
}

fn editor(placeholder: &str) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(placeholder);
    textarea
}

fn editor_with_text(text: &str, placeholder: &str) -> TextArea<'static> {
    let lines: Vec<String> = normalize_text(text).split('\n').map(String::from).collect();
    let mut textarea = TextArea::new(lines);
    textarea.set_placeholder_text(placeholder);
    textarea.move_cursor(CursorMove::Bottom);
    textarea.move_cursor(CursorMove::End);
    textarea
}

// =============================================================================
// State Sub-Structs
// =============================================================================

/// The three editors and keyboard focus.
pub struct EditorState {
    /// Story being written.
    pub story: TextArea<'static>,
    /// Optional long context.
    pub long_context: TextArea<'static>,
    /// Optional short memory.
    pub short_memory: TextArea<'static>,
    /// Focused panel.
    pub focus: Focus,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            story: editor(STORY_PLACEHOLDER),
            long_context: editor(LONG_CONTEXT_PLACEHOLDER),
            short_memory: editor(SHORT_MEMORY_PLACEHOLDER),
            focus: Focus::default(),
        }
    }
}

impl EditorState {
    /// Snapshot of the editor contents.
    #[must_use]
    pub fn input_state(&self) -> InputState {
        InputState {
            long_context: self.long_context.lines().join("\n"),
            short_memory: self.short_memory.lines().join("\n"),
            main_text: self.story_text(),
        }
    }

    /// The story text.
    #[must_use]
    pub fn story_text(&self) -> String {
        self.story.lines().join("\n")
    }

    /// Word and character counts of the story.
    #[must_use]
    pub fn counts(&self) -> TextCounts {
        TextCounts::of(&self.story_text())
    }

    /// Replaces the story text and puts the cursor at the end.
    pub fn set_story_text(&mut self, text: &str) {
        self.story = editor_with_text(text, STORY_PLACEHOLDER);
    }

    /// Replaces the long context text (used by tests and startup).
    pub fn set_long_context_text(&mut self, text: &str) {
        self.long_context = editor_with_text(text, LONG_CONTEXT_PLACEHOLDER);
    }

    /// The focused editor, or `None` when the cards have focus.
    pub fn focused_mut(&mut self) -> Option<&mut TextArea<'static>> {
        match self.focus {
            Focus::Story => Some(&mut self.story),
            Focus::LongContext => Some(&mut self.long_context),
            Focus::ShortMemory => Some(&mut self.short_memory),
            Focus::Directions => None,
        }
    }
}

/// Analysis busy state and rendered results.
#[derive(Debug, Default)]
pub struct AnalysisUiState {
    /// Set while an analysis request is in flight.
    pub busy: BusyFlag,
    /// Last successful analysis, kept while hidden.
    pub results: Option<UiModel>,
    /// Whether the results panel shows `results`.
    pub results_visible: bool,
    /// Selected direction card.
    pub selected: usize,
    /// Results panel scroll.
    pub(crate) scroll: ScrollState,
}

impl AnalysisUiState {
    /// Returns true while an analysis is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Label of the analysis trigger.
    #[must_use]
    pub fn trigger_label(&self) -> &'static str {
        if self.is_busy() {
            ANALYZING_LABEL
        } else {
            SUMMON_LABEL
        }
    }

    /// Results currently on screen.
    #[must_use]
    pub fn visible_results(&self) -> Option<&UiModel> {
        self.results.as_ref().filter(|_| self.results_visible)
    }

    /// Number of direction cards on screen.
    #[must_use]
    pub fn visible_direction_count(&self) -> usize {
        self.visible_results().map_or(0, |model| model.directions.len())
    }
}

/// Upload status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    /// Nothing uploaded; shows the hint.
    #[default]
    Idle,
    /// Upload of the named file in flight.
    Uploading(String),
    /// The named file was loaded.
    Loaded(String),
}

impl UploadStatus {
    /// Text of the status line.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Idle => UPLOAD_HINT.to_string(),
            Self::Uploading(name) => format!("Uploading {name}..."),
            Self::Loaded(name) => format!("✓ Loaded: {name}"),
        }
    }
}

/// Upload busy state, status and path prompt.
pub struct UploadUiState {
    /// Set while an upload is in flight.
    pub busy: BusyFlag,
    /// Status line.
    pub status: UploadStatus,
    /// Single-line path prompt.
    pub prompt: TextArea<'static>,
}

impl Default for UploadUiState {
    fn default() -> Self {
        Self {
            busy: BusyFlag::new(),
            status: UploadStatus::default(),
            prompt: editor(UPLOAD_PROMPT_PLACEHOLDER),
        }
    }
}

impl UploadUiState {
    /// Clears the path prompt.
    pub fn reset_prompt(&mut self) {
        self.prompt = editor(UPLOAD_PROMPT_PLACEHOLDER);
    }

    /// The typed path, trimmed.
    #[must_use]
    pub fn prompt_text(&self) -> String {
        self.prompt.lines().join("").trim().to_string()
    }
}

/// State for the settings panel.
#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    /// Currently selected index in the settings list.
    pub selected_index: usize,
    /// How overlapping preview responses are applied.
    pub preview_ordering: PreviewOrdering,
}

/// Areas cached once per frame.
///
/// Mouse hit-testing and scroll bounds read these so they always agree with
/// what was drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutState {
    /// The compose layout.
    pub compose: crate::app::ComposeLayout,
    /// Area the preview modal occupies when visible.
    pub preview_modal: ratatui::layout::Rect,
}

/// Scroll position of the results panel.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Current scroll offset in visual lines.
    pub offset: usize,
}

impl ScrollState {
    /// Scrolls to the top.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Scrolls up by a page.
    pub fn page_up(&mut self, page_size: usize) {
        self.offset = self.offset.saturating_sub(page_size);
    }

    /// Scrolls down by a page, stopping at the last full page.
    pub fn page_down(&mut self, content_len: usize, visible_height: usize, page_size: usize) {
        let max_scroll = content_len.saturating_sub(visible_height);
        self.offset = (self.offset + page_size).min(max_scroll);
    }

    /// Adjusts the offset so that rows `start..end` are visible.
    pub fn reveal(&mut self, start: usize, end: usize, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if start < self.offset {
            self.offset = start;
        } else if end > self.offset + visible_height {
            self.offset = end.saturating_sub(visible_height).min(start);
        }
    }
}
