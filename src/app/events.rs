//! Event handling logic for the App.

use std::path::PathBuf;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use super::App;
use crate::app::state::{AppEvent, AppMode, Focus, SettingsItem, normalize_text};
use crate::core::ToastLevel;
use crate::fs::PersistedSettings;
use crate::tui::widgets::layout_results;

/// Scroll page size for navigation.
const SCROLL_PAGE_SIZE: usize = 10;

/// Rows moved per mouse wheel step.
const MOUSE_SCROLL_ROWS: usize = 3;

impl App {
    /// Handles pasted text from bracketed paste mode.
    ///
    /// Line endings are normalized and control characters other than `\n`
    /// are dropped before the text reaches the focused editor. In the upload
    /// prompt only the first line is kept. Other overlays ignore pastes.
    pub fn handle_paste(&mut self, text: &str) {
        if text.is_empty() || self.preview.is_visible() {
            return;
        }

        let normalized = normalize_text(text);
        match self.mode {
            AppMode::Compose => {
                if let Some(editor) = self.editors.focused_mut() {
                    editor.insert_str(&normalized);
                }
            }
            AppMode::UploadPrompt => {
                let first_line = normalized.lines().next().unwrap_or_default();
                self.upload.prompt.insert_str(first_line);
            }
            AppMode::Settings => {}
        }
    }

    /// Handles a key event.
    ///
    /// Ctrl+C quits from anywhere except the settings panel, where it closes
    /// the panel. The preview modal, when visible, captures all other keys.
    pub fn handle_key(&mut self, key: KeyEvent) {
        tracing::trace!(code = ?key.code, modifiers = ?key.modifiers, "key");

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') && self.mode != AppMode::Settings {
            self.should_quit = true;
            return;
        }

        if self.preview.is_visible() {
            self.handle_preview_key(key);
            return;
        }

        match self.mode {
            AppMode::Compose => self.handle_compose_key(key),
            AppMode::UploadPrompt => self.handle_upload_prompt_key(key),
            AppMode::Settings => self.handle_settings_key(key),
        }
    }

    /// Handles a mouse event.
    ///
    /// A left click outside the preview modal dismisses it. With no modal
    /// open, clicking an editor focuses it and clicking a direction card
    /// previews it. The wheel scrolls the results panel.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.preview.is_visible() {
                    if !self.layout.preview_modal.contains(position) {
                        self.preview.dismiss();
                    }
                    return;
                }
                if self.mode == AppMode::Compose {
                    self.handle_compose_click(position);
                }
            }
            MouseEventKind::ScrollUp if !self.preview.is_visible() => {
                let offset = self.analysis.scroll.offset;
                self.analysis.scroll.offset = offset.saturating_sub(MOUSE_SCROLL_ROWS);
            }
            MouseEventKind::ScrollDown if !self.preview.is_visible() => {
                let (total, visible) = (self.results_line_count(), self.results_visible_height());
                self.analysis
                    .scroll
                    .page_down(total, visible, MOUSE_SCROLL_ROWS);
            }
            _ => {}
        }
    }

    fn handle_compose_click(&mut self, position: Position) {
        let compose = self.layout.compose;
        if compose.story.contains(position) {
            self.editors.focus = Focus::Story;
        } else if compose.long_context.contains(position) {
            self.editors.focus = Focus::LongContext;
        } else if compose.short_memory.contains(position) {
            self.editors.focus = Focus::ShortMemory;
        } else if compose.results.contains(position) {
            // Rows inside the border map onto the scrolled content
            let row = usize::from(position.y.saturating_sub(compose.results.y + 1))
                + self.analysis.scroll.offset;
            if let Some(index) = self.card_at_row(row) {
                self.editors.focus = Focus::Directions;
                self.request_preview(index);
            }
        }
    }

    // =========================================================================
    // Mode Handlers
    // =========================================================================

    /// Handles keys while the preview modal is open.
    ///
    /// `x`, `q`, Enter and Esc all dismiss. Digits switch to another card
    /// without waiting for the current preview.
    fn handle_preview_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('x' | 'q') => {
                self.preview.dismiss();
            }
            KeyCode::Char(c @ '1'..='9') => {
                self.preview_by_digit(c);
            }
            _ => {}
        }
    }

    /// Handles keys in compose mode.
    ///
    /// Key priorities:
    /// 1. Global shortcuts (analyze, upload, settings, export)
    /// 2. Focus cycling and results scrolling
    /// 3. Card navigation (Directions focus) or text editing
    fn handle_compose_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Enter | KeyCode::Char('d') if ctrl => {
                self.request_analysis();
                return;
            }
            KeyCode::Char('o') if ctrl => {
                self.open_upload_prompt();
                return;
            }
            KeyCode::Char('s') if ctrl => {
                self.open_settings();
                return;
            }
            KeyCode::Char('e') if ctrl => {
                self.export_results();
                return;
            }
            KeyCode::Tab => {
                let has_directions = self.analysis.visible_direction_count() > 0;
                self.editors.focus = self.editors.focus.next(has_directions);
                return;
            }
            KeyCode::BackTab => {
                let has_directions = self.analysis.visible_direction_count() > 0;
                self.editors.focus = self.editors.focus.prev(has_directions);
                return;
            }
            KeyCode::PageUp => {
                self.analysis.scroll.page_up(SCROLL_PAGE_SIZE);
                return;
            }
            KeyCode::PageDown => {
                let (total, visible) = (self.results_line_count(), self.results_visible_height());
                self.analysis
                    .scroll
                    .page_down(total, visible, SCROLL_PAGE_SIZE);
                return;
            }
            _ => {}
        }

        if self.editors.focus == Focus::Directions {
            self.handle_directions_key(key);
        } else if let Some(editor) = self.editors.focused_mut() {
            editor.input(key);
        }
    }

    /// Handles keys while the direction cards have focus.
    fn handle_directions_key(&mut self, key: KeyEvent) {
        let count = self.analysis.visible_direction_count();
        if count == 0 {
            self.editors.focus = Focus::Story;
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.analysis.selected = self.analysis.selected.saturating_sub(1);
                self.reveal_selected_card();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.analysis.selected = (self.analysis.selected + 1).min(count - 1);
                self.reveal_selected_card();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.request_preview(self.analysis.selected);
            }
            KeyCode::Char(c @ '1'..='9') => {
                self.preview_by_digit(c);
            }
            KeyCode::Esc => {
                self.editors.focus = Focus::Story;
            }
            _ => {}
        }
    }

    /// Handles keys in the upload path prompt.
    fn handle_upload_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.close_upload_prompt();
            }
            KeyCode::Enter => {
                let typed = self.upload.prompt_text();
                self.close_upload_prompt();
                if !typed.is_empty() {
                    self.request_upload(&PathBuf::from(typed));
                }
            }
            _ => {
                self.upload.prompt.input(key);
            }
        }
    }

    /// Handles key events in settings mode.
    fn handle_settings_key(&mut self, key: KeyEvent) {
        let items = SettingsItem::all();
        let max_index = items.len().saturating_sub(1);

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.settings.selected_index = self.settings.selected_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.settings.selected_index = (self.settings.selected_index + 1).min(max_index);
            }
            KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.settings.selected_index = self.settings.selected_index.saturating_sub(1);
            }
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.settings.selected_index = (self.settings.selected_index + 1).min(max_index);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.cycle_current_setting();
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.close_settings();
            }
            // Ctrl+C in settings closes settings instead of quitting
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.close_settings();
            }
            _ => {}
        }
    }

    // =========================================================================
    // Overlays
    // =========================================================================

    pub(crate) fn open_upload_prompt(&mut self) {
        self.upload.reset_prompt();
        self.mode = AppMode::UploadPrompt;
    }

    fn close_upload_prompt(&mut self) {
        self.upload.reset_prompt();
        self.mode = AppMode::Compose;
    }

    /// Opens the settings panel.
    pub(crate) fn open_settings(&mut self) {
        if self.mode == AppMode::Settings {
            return;
        }
        self.settings.selected_index = 0;
        self.mode = AppMode::Settings;
    }

    /// Closes the settings panel and saves `.ghostwriter/settings.json`.
    ///
    /// A failed save shows a toast; the panel closes regardless.
    pub(crate) fn close_settings(&mut self) {
        let mut persisted = match self.paths.load_settings() {
            Ok(persisted) => persisted,
            Err(e) => {
                tracing::warn!("Settings file unreadable, rewriting: {e:#}");
                PersistedSettings::default()
            }
        };
        persisted.update_from(&self.settings);

        if let Err(e) = self.paths.save_settings(&persisted) {
            tracing::warn!("Failed to save settings: {e:#}");
            self.notifications
                .show(ToastLevel::Error, format!("Failed to save settings: {e}"));
        }

        self.mode = AppMode::Compose;
    }

    /// Cycles through options for the currently selected setting.
    fn cycle_current_setting(&mut self) {
        let items = SettingsItem::all();
        let Some(current_item) = items.get(self.settings.selected_index) else {
            return;
        };

        match current_item {
            SettingsItem::PreviewOrdering => {
                self.settings.preview_ordering = self.settings.preview_ordering.next();
                tracing::info!(
                    ordering = self.settings.preview_ordering.name(),
                    "Preview ordering changed"
                );
            }
            SettingsItem::ServerUrl | SettingsItem::RequestTimeout => {}
        }
    }

    // =========================================================================
    // Results Navigation
    // =========================================================================

    fn preview_by_digit(&mut self, digit: char) {
        let Some(number) = digit.to_digit(10) else {
            return;
        };
        let index = number as usize - 1;
        if index < self.analysis.visible_direction_count() {
            self.editors.focus = Focus::Directions;
            self.request_preview(index);
        }
    }

    fn results_visible_height(&self) -> usize {
        self.layout.compose.results_visible_height
    }

    /// Number of rows the results panel currently draws.
    pub(crate) fn results_line_count(&self) -> usize {
        self.analysis.visible_results().map_or(1, |model| {
            layout_results(
                model,
                self.layout.compose.results_content_width,
                self.selected_card(),
                &self.theme,
            )
            .len()
        })
    }

    /// Card marked as selected in the results panel, if any.
    pub(crate) fn selected_card(&self) -> Option<usize> {
        (self.analysis.visible_direction_count() > 0).then_some(self.analysis.selected)
    }

    fn card_at_row(&self, row: usize) -> Option<usize> {
        let model = self.analysis.visible_results()?;
        let lines = layout_results(
            model,
            self.layout.compose.results_content_width,
            self.selected_card(),
            &self.theme,
        );
        lines.cards.iter().position(|rows| rows.contains(&row))
    }

    fn reveal_selected_card(&mut self) {
        let Some(model) = self.analysis.visible_results() else {
            return;
        };
        let lines = layout_results(
            model,
            self.layout.compose.results_content_width,
            self.selected_card(),
            &self.theme,
        );
        if let Some(rows) = lines.cards.get(self.analysis.selected) {
            let visible = self.results_visible_height();
            self.analysis.scroll.reveal(rows.start, rows.end, visible);
        }
    }

    // =========================================================================
    // Request Events
    // =========================================================================

    /// Applies all pending request results.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
        self.recover_abandoned_upload();
    }

    /// Applies one request result.
    ///
    /// The flow's busy guard is dropped only after its result is applied.
    pub(crate) fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::UploadFinished { result, guard } => {
                self.apply_upload(result);
                drop(guard);
            }
            AppEvent::AnalysisFinished { result, guard } => {
                self.apply_analysis(result);
                drop(guard);
            }
            AppEvent::PreviewSettled { generation, body } => {
                self.apply_preview(generation, body);
            }
        }
    }
}
