//! Analysis flow tests.
//!
//! - Local validation (no request for short stories)
//! - Single-flight trigger while a request is in flight
//! - Results applied on success, hidden but kept on failure
//! - Busy state restored after every failure mode

use super::helpers::*;
use crate::app::actions::{ANALYSIS_FAILED_TOAST, INSUFFICIENT_INPUT_TOAST};
use crate::app::state::{ANALYZING_LABEL, SUMMON_LABEL};
use crate::app::*;
use crate::core::FlowError;
use crate::core::render::{Badge, EngineSource};
use ratatui::crossterm::event::{KeyCode, KeyModifiers};

fn toast_text(app: &App) -> Option<&str> {
    app.notifications.current().map(|toast| toast.message.as_str())
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn short_story_is_rejected_without_a_request() {
    let service = ScriptedService::new();
    let (mut app, _dir) = create_test_app(service.clone());
    app.editors.set_story_text("   too short   ");

    app.handle_key(ctrl_key('d'));
    tokio::task::yield_now().await;

    assert_eq!(toast_text(&app), Some(INSUFFICIENT_INPUT_TOAST));
    assert!(!app.analysis.is_busy());
    assert_eq!(app.analysis.trigger_label(), SUMMON_LABEL);
    assert_eq!(service.calls(), (0, 0, 0));
}

#[tokio::test]
async fn ten_characters_after_trimming_are_enough() {
    let service = ScriptedService::new();
    let (mut app, _dir) = create_test_app(service.clone());
    app.editors.set_story_text("  0123456789\n");
    service.push_analysis(Step::Reply(Ok(noir_response())));

    app.request_analysis();
    next_event(&mut app).await;

    assert_eq!(service.calls().1, 1);
    let requests = service.analysis_requests.lock().unwrap();
    assert_eq!(requests[0].last_paragraph, "0123456789");
}

#[tokio::test]
async fn ctrl_enter_triggers_from_any_editor() {
    let service = ScriptedService::new();
    let (mut app, _dir) = create_test_app(service.clone());
    app.editors.set_story_text(STORY);
    app.editors.focus = Focus::ShortMemory;
    service.push_analysis(Step::Reply(Ok(noir_response())));

    app.handle_key(ratatui::crossterm::event::KeyEvent::new(
        KeyCode::Enter,
        KeyModifiers::CONTROL,
    ));
    assert!(app.analysis.is_busy());
    next_event(&mut app).await;

    assert_eq!(service.calls().1, 1);
    // Ctrl+Enter must not have inserted a newline
    assert_eq!(app.editors.short_memory.lines(), [""]);
}

#[tokio::test]
async fn request_carries_context_and_memory() {
    let service = ScriptedService::new();
    let (mut app, _dir) = create_test_app(service.clone());
    app.editors.set_story_text(STORY);
    app.editors.set_long_context_text("  Book one: the flood.  ");
    app.editors.focus = Focus::ShortMemory;
    type_text(&mut app, "Mara lost the key");
    service.push_analysis(Step::Reply(Ok(noir_response())));

    app.request_analysis();
    next_event(&mut app).await;

    let requests = service.analysis_requests.lock().unwrap();
    assert_eq!(requests[0].full_context, "Book one: the flood.");
    assert_eq!(requests[0].short_memory, "Mara lost the key");
    assert_eq!(requests[0].last_paragraph, STORY);
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn success_renders_noir_results() {
    let service = ScriptedService::new();
    let (mut app, _dir) = create_test_app(service.clone());
    app.editors.set_story_text(STORY);
    service.push_analysis(Step::Reply(Ok(noir_response())));

    app.request_analysis();
    assert!(app.analysis.is_busy());
    assert_eq!(app.analysis.trigger_label(), ANALYZING_LABEL);

    next_event(&mut app).await;

    assert!(!app.analysis.is_busy());
    assert_eq!(app.analysis.trigger_label(), SUMMON_LABEL);
    let model = app.analysis.visible_results().unwrap();
    assert_eq!(model.badges[0], Badge::Genre("Noir".into()));
    assert_eq!(model.badges[1], Badge::Tone("Tense".into()));
    assert_eq!(model.badges[2], Badge::Engine(EngineSource::Ai));
    assert_eq!(model.bridge, None);
    assert_eq!(model.directions[0].name, "Path 1");
    assert_eq!(model.directions[1].name, "Path 2");
}

#[tokio::test]
async fn success_resets_selection_and_scroll() {
    let service = ScriptedService::new();
    let (mut app, _dir) = app_with_results(&service).await;
    app.analysis.selected = 1;
    app.analysis.scroll.offset = 4;

    service.push_analysis(Step::Reply(Ok(noir_response())));
    app.request_analysis();
    next_event(&mut app).await;

    assert_eq!(app.analysis.selected, 0);
    assert_eq!(app.analysis.scroll.offset, 0);
}

// =============================================================================
// Single Flight
// =============================================================================

#[tokio::test]
async fn second_trigger_while_busy_is_dropped() {
    let service = ScriptedService::new();
    let (mut app, _dir) = create_test_app(service.clone());
    app.editors.set_story_text(STORY);
    let (step, release) = Step::gated(Ok(noir_response()));
    service.push_analysis(step);

    app.handle_key(ctrl_key('d'));
    app.handle_key(ctrl_key('d'));
    app.handle_key(ctrl_key('d'));
    wait_until(|| service.calls().1 == 1).await;

    release.send(()).unwrap();
    next_event(&mut app).await;
    tokio::task::yield_now().await;

    assert_eq!(service.calls().1, 1);
    assert!(app.event_rx.try_recv().is_err());
    assert!(!app.analysis.is_busy());
}

#[tokio::test]
async fn flow_stays_busy_until_result_is_applied() {
    let service = ScriptedService::new();
    let (mut app, _dir) = create_test_app(service.clone());
    app.editors.set_story_text(STORY);
    service.push_analysis(Step::Reply(Ok(noir_response())));

    app.request_analysis();
    wait_for_queued_event(&app).await;

    // The task is done but its result has not been applied yet
    assert!(app.analysis.is_busy());
    app.request_analysis();
    tokio::task::yield_now().await;
    assert_eq!(service.calls().1, 1);
    assert!(app.analysis.visible_results().is_none());

    next_event(&mut app).await;
    assert!(!app.analysis.is_busy());
    assert!(app.analysis.visible_results().is_some());
    assert!(app.event_rx.try_recv().is_err());
}

#[tokio::test]
async fn previous_results_are_hidden_not_cleared() {
    let service = ScriptedService::new();
    let (mut app, _dir) = app_with_results(&service).await;
    app.editors.focus = Focus::Directions;

    let (step, release) = Step::gated(Err(FlowError::RemoteError {
        status: 500,
        message: None,
    }));
    service.push_analysis(step);
    app.request_analysis();

    assert!(!app.analysis.results_visible);
    assert!(app.analysis.results.is_some());
    assert_eq!(app.editors.focus, Focus::Story);

    release.send(()).unwrap();
    next_event(&mut app).await;

    // Failure keeps the old results hidden
    assert!(!app.analysis.results_visible);
    assert!(app.analysis.results.is_some());
}

// =============================================================================
// Failures
// =============================================================================

async fn assert_failure_restores_trigger(error: FlowError) {
    let service = ScriptedService::new();
    let (mut app, _dir) = create_test_app(service.clone());
    app.editors.set_story_text(STORY);
    service.push_analysis(Step::Reply(Err(error)));

    app.request_analysis();
    next_event(&mut app).await;

    assert!(!app.analysis.is_busy());
    assert_eq!(app.analysis.trigger_label(), SUMMON_LABEL);
    assert_eq!(toast_text(&app), Some(ANALYSIS_FAILED_TOAST));
    assert!(app.analysis.visible_results().is_none());
}

#[tokio::test]
async fn non_success_status_restores_trigger() {
    assert_failure_restores_trigger(FlowError::RemoteError {
        status: 503,
        message: None,
    })
    .await;
}

#[tokio::test]
async fn transport_error_restores_trigger() {
    assert_failure_restores_trigger(FlowError::TransportError("connection refused".into())).await;
}

#[tokio::test]
async fn malformed_body_restores_trigger() {
    assert_failure_restores_trigger(FlowError::TransportError("expected value".into())).await;
}

#[tokio::test]
async fn panic_in_request_task_restores_trigger() {
    let service = ScriptedService::new();
    let (mut app, _dir) = create_test_app(service.clone());
    app.editors.set_story_text(STORY);
    service.push_analysis(Step::Panic);

    app.request_analysis();
    assert!(app.analysis.is_busy());

    let busy = app.analysis.busy.clone();
    wait_until(|| !busy.is_busy()).await;
    assert_eq!(app.analysis.trigger_label(), SUMMON_LABEL);

    // The trigger works again afterwards
    service.push_analysis(Step::Reply(Ok(noir_response())));
    app.request_analysis();
    next_event(&mut app).await;
    assert!(app.analysis.visible_results().is_some());
}
