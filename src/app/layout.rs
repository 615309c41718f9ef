//! Layout calculation helpers for the TUI.
//!
//! [`calculate_compose_layout`] is the single source of truth for panel
//! geometry: `App::update_layout` caches its result once per frame and both
//! rendering and mouse hit-testing read the cached value.

use ratatui::layout::{Constraint, Layout, Rect};

/// Layout of the compose screen.
///
/// ```text
/// header
/// ┌ story ─────────────┐┌ results ─────┐
/// │                    ││              │
/// └────────────────────┘│              │
/// ┌ long context ──────┐│              │
/// └────────────────────┘│              │
/// ┌ short memory ──────┐│              │
/// └────────────────────┘└──────────────┘
/// status
/// footer
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeLayout {
    /// Header area (1 line).
    pub header: Rect,
    /// Story editor.
    pub story: Rect,
    /// Long context editor.
    pub long_context: Rect,
    /// Short memory editor.
    pub short_memory: Rect,
    /// Results panel.
    pub results: Rect,
    /// Status line (upload status, counts, trigger).
    pub status: Rect,
    /// Footer area (key hints, 1 line).
    pub footer: Rect,
    /// Visible height of the results panel (excluding borders).
    pub results_visible_height: usize,
    /// Content width of the results panel (excluding borders and scrollbar).
    pub results_content_width: usize,
}

const VERTICAL_CONSTRAINTS: [Constraint; 4] = [
    Constraint::Length(1), // Header
    Constraint::Min(9),    // Body
    Constraint::Length(1), // Status
    Constraint::Length(1), // Footer
];

const BODY_CONSTRAINTS: [Constraint; 2] = [Constraint::Percentage(55), Constraint::Percentage(45)];

const EDITOR_CONSTRAINTS: [Constraint; 3] = [
    Constraint::Min(5),    // Story (grows)
    Constraint::Length(4), // Long context
    Constraint::Length(3), // Short memory
];

/// Calculates the compose layout for `area`.
#[must_use]
pub fn calculate_compose_layout(area: Rect) -> ComposeLayout {
    let rows = Layout::vertical(VERTICAL_CONSTRAINTS).split(area);
    let body = Layout::horizontal(BODY_CONSTRAINTS).split(rows[1]);
    let editors = Layout::vertical(EDITOR_CONSTRAINTS).split(body[0]);
    let results = body[1];

    // Results: 2 for borders on each axis, 1 more for the scrollbar
    let results_visible_height = results.height.saturating_sub(2) as usize;
    let results_content_width = results.width.saturating_sub(3) as usize;

    ComposeLayout {
        header: rows[0],
        story: editors[0],
        long_context: editors[1],
        short_memory: editors[2],
        results,
        status: rows[2],
        footer: rows[3],
        results_visible_height,
        results_content_width,
    }
}

/// Returns a rectangle of `percent_x` by `height` centered in `area`,
/// clamped to fit.
#[must_use]
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let width = width.max(20).min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Area of the preview modal within the terminal `area`.
#[must_use]
pub fn preview_modal_area(area: Rect) -> Rect {
    centered_rect(70, area.height.saturating_mul(3) / 5, area)
}

/// Area of the upload path prompt within the terminal `area`.
#[must_use]
pub fn upload_prompt_area(area: Rect) -> Rect {
    centered_rect(60, 7, area)
}
