//! Terminal setup and configuration utilities.
//!
//! Enables the terminal event modes the editor relies on:
//! - Bracketed paste mode (multi-line paste arrives as one event)
//! - Keyboard enhancement protocol (Ctrl+Enter is distinguishable from Enter)
//! - Mouse capture (clicks on the preview backdrop)

use std::io::stdout;

use ratatui::crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use ratatui::crossterm::execute;

/// Guard to ensure terminal event modes are disabled on drop.
///
/// Every mode is optional: a terminal that refuses one keeps working with
/// reduced input fidelity.
pub struct TerminalEventGuard {
    bracketed_paste_enabled: bool,
    keyboard_enhancement_enabled: bool,
    mouse_capture_enabled: bool,
}

impl TerminalEventGuard {
    #[must_use]
    pub fn new() -> Self {
        let mut guard = Self {
            bracketed_paste_enabled: false,
            keyboard_enhancement_enabled: false,
            mouse_capture_enabled: false,
        };

        match execute!(stdout(), EnableBracketedPaste) {
            Ok(()) => {
                tracing::debug!("Bracketed paste mode enabled");
                guard.bracketed_paste_enabled = true;
            }
            Err(e) => {
                tracing::warn!("Could not enable bracketed paste mode: {e}");
            }
        }

        // Kitty protocol; without it Ctrl+Enter arrives as plain Enter
        match execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        ) {
            Ok(()) => {
                tracing::debug!("Keyboard enhancement enabled");
                guard.keyboard_enhancement_enabled = true;
            }
            Err(e) => {
                tracing::debug!("Keyboard enhancement unavailable: {e}");
            }
        }

        match execute!(stdout(), EnableMouseCapture) {
            Ok(()) => {
                tracing::debug!("Mouse capture enabled");
                guard.mouse_capture_enabled = true;
            }
            Err(e) => {
                tracing::warn!("Could not enable mouse capture: {e}");
            }
        }

        guard
    }
}

impl Default for TerminalEventGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalEventGuard {
    fn drop(&mut self) {
        if self.mouse_capture_enabled {
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        if self.keyboard_enhancement_enabled {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        if self.bracketed_paste_enabled {
            let _ = execute!(stdout(), DisableBracketedPaste);
        }
    }
}
