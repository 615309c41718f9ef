//! Rendering, toast and export tests.
//!
//! Tests for the compose view including:
//! - Header, editors, status line and footer
//! - Results panel states (placeholder, loading, results)
//! - Preview modal and toast overlays
//! - Exporting results

use std::time::{Duration, Instant};

use super::helpers::*;
use crate::app::actions::NOTHING_TO_EXPORT_TOAST;
use crate::app::*;
use crate::core::model::PreviewResult;
use crate::core::notify::TOAST_DURATION;
use crate::core::preview::PREVIEW_LOADING_TEXT;
use crate::core::{FlowError, ToastLevel};
use anyhow::Result;
use ratatui::crossterm::event::KeyCode;

// =============================================================================
// Compose View
// =============================================================================

mod compose_render_tests {
    use super::*;

    #[test]
    fn initial_screen_shows_all_panels() -> Result<()> {
        let (mut app, _dir) = create_test_app(ScriptedService::new());
        let terminal = render_app_to_terminal(&mut app, 100, 30)?;

        assert!(buffer_contains(&terminal, "Ghostwriter [http://localhost:8080]"));
        assert!(buffer_contains(&terminal, "Story"));
        assert!(buffer_contains(&terminal, "Long Context"));
        assert!(buffer_contains(&terminal, "Short Memory"));
        assert!(buffer_contains(&terminal, "Ghost"));
        assert!(buffer_contains(&terminal, "Write a few sentences"));
        assert!(buffer_contains(&terminal, "Press Ctrl+O to load a .pdf or .txt"));
        assert!(buffer_contains(&terminal, "0 words · 0 chars  [Summon Ghost]"));
        assert!(buffer_contains(&terminal, "[Ctrl+D] Summon"));
        Ok(())
    }

    #[test]
    fn status_line_counts_story_text() -> Result<()> {
        let (mut app, _dir) = create_test_app(ScriptedService::new());
        app.editors.set_story_text("One two\nthree");

        let terminal = render_app_to_terminal(&mut app, 100, 30)?;
        assert!(buffer_contains(&terminal, "3 words · 13 chars"));
        Ok(())
    }

    #[test]
    fn story_text_is_drawn_in_editor() -> Result<()> {
        let (mut app, _dir) = create_test_app(ScriptedService::new());
        type_text(&mut app, "Rain on tin roofs");

        let terminal = render_app_to_terminal(&mut app, 100, 30)?;
        let rows = buffer_rows(&terminal);
        let story = app.layout.compose.story;
        let first_row = &rows[usize::from(story.y + 1)];
        assert!(first_row.contains("Rain on tin roofs"));
        Ok(())
    }

    #[tokio::test]
    async fn busy_analysis_shows_loading_and_label() -> Result<()> {
        let service = ScriptedService::new();
        let (mut app, _dir) = create_test_app(service.clone());
        app.editors.set_story_text(STORY);
        let (step, release) = Step::gated(Ok(noir_response()));
        service.push_analysis(step);

        app.request_analysis();
        let terminal = render_app_to_terminal(&mut app, 100, 30)?;
        assert!(buffer_contains(&terminal, "The ghost is reading your story..."));
        assert!(buffer_contains(&terminal, "[Analyzing...]"));

        release.send(()).unwrap();
        next_event(&mut app).await;
        let terminal = render_app_to_terminal(&mut app, 100, 30)?;
        assert!(buffer_contains(&terminal, "[Summon Ghost]"));
        assert!(!buffer_contains(&terminal, "The ghost is reading"));
        Ok(())
    }

    #[tokio::test]
    async fn results_panel_shows_badges_entities_and_cards() -> Result<()> {
        let service = ScriptedService::new();
        let (mut app, _dir) = app_with_results(&service).await;

        let terminal = render_app_to_terminal(&mut app, 100, 30)?;
        assert!(buffer_contains(&terminal, "Genre: Noir"));
        assert!(buffer_contains(&terminal, "Tone: Tense"));
        assert!(buffer_contains(&terminal, "#Mara"));
        assert!(buffer_contains(&terminal, "Directions"));
        assert!(buffer_contains(&terminal, "1. Path 1"));
        assert!(buffer_contains(&terminal, "2. Path 2"));
        assert!(buffer_contains(&terminal, "Flee"));
        assert!(buffer_contains(&terminal, "Fight"));
        Ok(())
    }

    #[tokio::test]
    async fn directions_focus_changes_footer() -> Result<()> {
        let service = ScriptedService::new();
        let (mut app, _dir) = app_with_results(&service).await;
        app.editors.focus = Focus::Directions;

        let terminal = render_app_to_terminal(&mut app, 100, 30)?;
        assert!(buffer_contains(&terminal, "[Enter/1-9] Preview"));
        assert!(buffer_contains(&terminal, "› 1. Path 1"));
        assert!(buffer_contains(&terminal, "Enter to preview this path"));
        Ok(())
    }

    #[tokio::test]
    async fn hidden_results_show_placeholder() -> Result<()> {
        let service = ScriptedService::new();
        let (mut app, _dir) = app_with_results(&service).await;
        service.push_analysis(Step::Reply(Err(FlowError::TransportError("down".into()))));
        app.request_analysis();
        next_event(&mut app).await;

        let terminal = render_app_to_terminal(&mut app, 100, 30)?;
        assert!(!buffer_contains(&terminal, "Genre: Noir"));
        assert!(buffer_contains(&terminal, "Write a few sentences"));
        Ok(())
    }

    #[test]
    fn upload_prompt_overlay() -> Result<()> {
        let (mut app, _dir) = create_test_app(ScriptedService::new());
        app.handle_key(ctrl_key('o'));
        type_text(&mut app, "draft.txt");

        let terminal = render_app_to_terminal(&mut app, 100, 30)?;
        assert!(buffer_contains(&terminal, "Load Story"));
        assert!(buffer_contains(&terminal, "Path to a .pdf or .txt file:"));
        assert!(buffer_contains(&terminal, "draft.txt"));
        Ok(())
    }

    #[test]
    fn small_terminal_does_not_panic() -> Result<()> {
        let (mut app, _dir) = create_test_app(ScriptedService::new());
        app.notifications.show(ToastLevel::Info, "a fairly long toast message");
        app.open_settings();
        for (width, height) in [(10, 5), (30, 8), (20, 3)] {
            render_app_to_terminal(&mut app, width, height)?;
        }
        Ok(())
    }
}

// =============================================================================
// Preview Modal
// =============================================================================

mod preview_render_tests {
    use super::*;

    #[tokio::test]
    async fn modal_shows_title_and_body() -> Result<()> {
        let service = ScriptedService::new();
        let (mut app, _dir) = app_with_results(&service).await;
        let (step, release) = Step::gated(Ok(PreviewResult {
            preview: Some("She took the night train south.".into()),
        }));
        service.push_expansion(step);

        app.request_preview(0);
        let terminal = render_app_to_terminal(&mut app, 100, 30)?;
        assert!(buffer_contains(&terminal, " Path 1 "));
        assert!(buffer_contains(&terminal, PREVIEW_LOADING_TEXT));
        assert!(buffer_contains(&terminal, "[x/Esc] Close"));

        release.send(()).unwrap();
        next_event(&mut app).await;
        let terminal = render_app_to_terminal(&mut app, 100, 30)?;
        assert!(buffer_contains(&terminal, "She took the night train south."));

        app.handle_key(key(KeyCode::Char('x')));
        let terminal = render_app_to_terminal(&mut app, 100, 30)?;
        assert!(!buffer_contains(&terminal, "She took the night train"));
        Ok(())
    }

    #[tokio::test]
    async fn control_sequences_are_not_drawn() -> Result<()> {
        let service = ScriptedService::new();
        let (mut app, _dir) = app_with_results(&service).await;
        service.push_expansion(Step::Reply(Ok(PreviewResult {
            preview: Some("safe\u{1b}[2Jtext".into()),
        })));

        app.request_preview(0);
        next_event(&mut app).await;
        let terminal = render_app_to_terminal(&mut app, 100, 30)?;

        assert!(buffer_contains(&terminal, "safe"));
        assert!(!buffer_rows(&terminal).iter().any(|row| row.contains('\u{1b}')));
        Ok(())
    }
}

// =============================================================================
// Toasts
// =============================================================================

mod toast_tests {
    use super::*;

    #[test]
    fn toast_is_drawn_above_status_line() -> Result<()> {
        let (mut app, _dir) = create_test_app(ScriptedService::new());
        app.notifications.show(ToastLevel::Success, "Results exported");

        let terminal = render_app_to_terminal(&mut app, 100, 30)?;
        let rows = buffer_rows(&terminal);
        assert!(rows[27].contains(" Results exported "));
        Ok(())
    }

    #[test]
    fn tick_expires_old_toast() {
        let (mut app, _dir) = create_test_app(ScriptedService::new());
        let shown = Instant::now()
            .checked_sub(TOAST_DURATION + Duration::from_millis(10))
            .unwrap();
        app.notifications
            .show_at(ToastLevel::Info, "old news", shown);

        app.tick();
        assert!(app.notifications.current().is_none());
    }

    #[test]
    fn tick_keeps_fresh_toast() {
        let (mut app, _dir) = create_test_app(ScriptedService::new());
        app.notifications.show(ToastLevel::Info, "fresh");

        app.tick();
        assert_eq!(app.notifications.current().unwrap().message, "fresh");
    }

    #[test]
    fn newer_toast_replaces_older() {
        let (mut app, _dir) = create_test_app(ScriptedService::new());
        app.handle_key(ctrl_key('e'));
        app.handle_key(ctrl_key('d'));

        let toast = app.notifications.current().unwrap();
        assert_eq!(toast.message, "Write at least a few sentences first.");
    }
}

// =============================================================================
// Export
// =============================================================================

mod export_tests {
    use super::*;

    #[test]
    fn export_without_results_shows_toast() {
        let (mut app, _dir) = create_test_app(ScriptedService::new());
        app.handle_key(ctrl_key('e'));

        assert_eq!(
            app.notifications.current().unwrap().message,
            NOTHING_TO_EXPORT_TOAST
        );
        assert!(!app.paths().results_file().exists());
    }

    #[tokio::test]
    async fn export_writes_results_document() {
        let service = ScriptedService::new();
        let (mut app, _dir) = app_with_results(&service).await;

        app.handle_key(ctrl_key('e'));

        let path = app.paths().results_file();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Noir"));
        assert!(html.contains("Path 1"));
        let toast = app.notifications.current().unwrap();
        assert_eq!(toast.level, ToastLevel::Success);
        assert!(toast.message.starts_with("Results exported to"));
    }

    #[tokio::test]
    async fn export_failure_shows_error_toast() {
        let service = ScriptedService::new();
        let (mut app, dir) = app_with_results(&service).await;
        std::fs::write(dir.path().join(".ghostwriter"), "blocked").unwrap();

        app.handle_key(ctrl_key('e'));

        let toast = app.notifications.current().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert!(toast.message.starts_with("Export failed"));
    }
}
