//! Shared test utilities for the app module.
//!
//! - [`ScriptedService`] - a `StoryService` that replays queued replies, with
//!   optional gates to control when each reply resolves
//! - [`create_test_app`] - an `App` over a scripted service in a temp dir
//! - [`next_event`] / [`wait_until`] - drive spawned request tasks
//! - [`render_app_to_terminal`] - renders the app to a `TestBackend`
//! - Key event helpers (`char_key`, `ctrl_key`, `key`)
//! - [`CwdGuard`] - serializes tests that change the working directory

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::TestBackend};
use tempfile::TempDir;
use tokio::sync::oneshot;

use crate::app::App;
use crate::core::model::{AnalysisResponse, PreviewResult, UploadFile, UploadedStory};
use crate::core::{AnalysisRequest, FlowError, PreviewRequest};
use crate::fs::{GhostwriterPaths, ServiceConfig};
use crate::service::StoryService;

/// Creates a [`KeyEvent`] for `code` with no modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] for a character key with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// Creates a [`KeyEvent`] for Ctrl plus a character.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Types each character of `text` into the app.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(char_key(c));
    }
}

/// Mutex to serialize tests that modify the current working directory.
/// `std::env::set_current_dir` is process-global.
pub static CWD_MUTEX: Mutex<()> = Mutex::new(());

/// Restores the original working directory when dropped, and holds
/// [`CWD_MUTEX`] until then.
pub struct CwdGuard {
    original_dir: std::path::PathBuf,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl CwdGuard {
    /// Locks the mutex and moves into `dir`.
    pub fn enter(dir: &std::path::Path) -> Result<Self> {
        // A panicking test poisons the lock; the next test still needs it
        let lock = CWD_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let original_dir = std::env::current_dir()?;
        std::env::set_current_dir(dir)?;
        Ok(Self {
            original_dir,
            _lock: lock,
        })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

// =============================================================================
// Scripted Service
// =============================================================================

/// One queued reply.
pub enum Step<T> {
    /// Resolve immediately.
    Reply(Result<T, FlowError>),
    /// Resolve once the paired sender fires (or is dropped).
    Gated(oneshot::Receiver<()>, Result<T, FlowError>),
    /// Panic inside the request task.
    Panic,
}

impl<T> Step<T> {
    /// A gated reply and the sender that releases it.
    pub fn gated(result: Result<T, FlowError>) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (Self::Gated(rx, result), tx)
    }

    async fn run(self) -> Result<T, FlowError> {
        match self {
            Self::Reply(result) => result,
            Self::Gated(gate, result) => {
                let _ = gate.await;
                result
            }
            Self::Panic => panic!("scripted service panic"),
        }
    }
}

/// `StoryService` that replays queued steps and records every call.
///
/// An empty queue answers with a transport error.
#[derive(Default)]
pub struct ScriptedService {
    uploads: Mutex<VecDeque<Step<UploadedStory>>>,
    analyses: Mutex<VecDeque<Step<AnalysisResponse>>>,
    expansions: Mutex<VecDeque<Step<PreviewResult>>>,
    /// Number of upload calls.
    pub upload_calls: AtomicUsize,
    /// Number of analyze calls.
    pub analyze_calls: AtomicUsize,
    /// Number of expand calls.
    pub expand_calls: AtomicUsize,
    /// Files passed to upload.
    pub uploaded: Mutex<Vec<UploadFile>>,
    /// Requests passed to analyze.
    pub analysis_requests: Mutex<Vec<AnalysisRequest>>,
    /// Requests passed to expand.
    pub preview_requests: Mutex<Vec<PreviewRequest>>,
}

impl ScriptedService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_upload(&self, step: Step<UploadedStory>) {
        self.uploads.lock().unwrap().push_back(step);
    }

    pub fn push_analysis(&self, step: Step<AnalysisResponse>) {
        self.analyses.lock().unwrap().push_back(step);
    }

    pub fn push_expansion(&self, step: Step<PreviewResult>) {
        self.expansions.lock().unwrap().push_back(step);
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.upload_calls.load(Ordering::SeqCst),
            self.analyze_calls.load(Ordering::SeqCst),
            self.expand_calls.load(Ordering::SeqCst),
        )
    }
}

fn unscripted<T>() -> Step<T> {
    Step::Reply(Err(FlowError::TransportError("no scripted reply".into())))
}

#[async_trait]
impl StoryService for ScriptedService {
    async fn upload(&self, file: UploadFile) -> Result<UploadedStory, FlowError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.uploaded.lock().unwrap().push(file);
        let step = self.uploads.lock().unwrap().pop_front();
        step.unwrap_or_else(unscripted).run().await
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, FlowError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.analysis_requests.lock().unwrap().push(request.clone());
        let step = self.analyses.lock().unwrap().pop_front();
        step.unwrap_or_else(unscripted).run().await
    }

    async fn expand(&self, request: &PreviewRequest) -> Result<PreviewResult, FlowError> {
        self.expand_calls.fetch_add(1, Ordering::SeqCst);
        self.preview_requests.lock().unwrap().push(request.clone());
        let step = self.expansions.lock().unwrap().pop_front();
        step.unwrap_or_else(unscripted).run().await
    }
}

// =============================================================================
// App Helpers
// =============================================================================

/// Creates an `App` over `service` with paths in a fresh temp dir.
///
/// The returned `TempDir` must outlive the app.
pub fn create_test_app(service: Arc<ScriptedService>) -> (App, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let paths = GhostwriterPaths::new(temp_dir.path());
    let mut app = App::new_with_service(paths, ServiceConfig::default(), service);
    app.update_layout(Rect::new(0, 0, 100, 30));
    (app, temp_dir)
}

/// Waits for the next request event and applies it.
pub async fn next_event(app: &mut App) {
    let event = tokio::time::timeout(Duration::from_secs(5), app.event_rx.recv())
        .await
        .expect("timed out waiting for a request event")
        .expect("event channel closed");
    app.handle_event(event);
}

/// Waits until a request event is queued, without applying it.
pub async fn wait_for_queued_event(app: &App) {
    wait_until(|| !app.event_rx.is_empty()).await;
}

/// Polls `condition` until it holds, yielding to spawned tasks in between.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

/// Analysis reply used across the tests.
pub fn noir_response() -> AnalysisResponse {
    serde_json::from_str(
        r#"{
            "genre_detected": "Noir",
            "tone_detected": "Tense",
            "source": "ai",
            "key_entities": ["Mara"],
            "narrative_bridge": "",
            "directions": ["Flee", "Fight"]
        }"#,
    )
    .unwrap()
}

/// Story text long enough to analyze.
pub const STORY: &str = "The rain had not stopped for three days.";

/// Runs a successful analysis so that the noir results are visible.
pub async fn app_with_results(service: &Arc<ScriptedService>) -> (App, TempDir) {
    let (mut app, temp_dir) = create_test_app(service.clone());
    app.editors.set_story_text(STORY);
    service.push_analysis(Step::Reply(Ok(noir_response())));
    app.request_analysis();
    next_event(&mut app).await;
    assert!(app.analysis.visible_results().is_some());
    (app, temp_dir)
}

/// Renders the app to a `TestBackend` terminal.
///
/// Mimics the main loop: the layout is recomputed before drawing.
pub fn render_app_to_terminal(
    app: &mut App,
    width: u16,
    height: u16,
) -> Result<Terminal<TestBackend>> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    app.update_layout(Rect::new(0, 0, width, height));
    terminal.draw(|frame| app.render(frame))?;

    Ok(terminal)
}

/// Collects the buffer into one string per row.
pub fn buffer_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    (0..area.height)
        .map(|y| (0..area.width).map(|x| buffer[(x, y)].symbol()).collect())
        .collect()
}

/// Returns true if any row of the buffer contains `needle`.
pub fn buffer_contains(terminal: &Terminal<TestBackend>, needle: &str) -> bool {
    buffer_rows(terminal).iter().any(|row| row.contains(needle))
}
