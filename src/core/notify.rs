//! Transient toast notifications.

use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Severity of a toast, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    /// Neutral information or a local validation hint.
    Info,
    /// A flow completed.
    Success,
    /// A flow failed.
    Error,
}

/// A message shown briefly at the bottom of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// The message text.
    pub message: String,
    /// Severity.
    pub level: ToastLevel,
    /// When the toast was shown.
    pub shown_at: Instant,
}

/// Holds at most one toast; a new one replaces the current one.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    current: Option<Toast>,
}

impl Notifications {
    /// Shows `message`, replacing any visible toast.
    pub fn show(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.show_at(level, message, Instant::now());
    }

    /// Shows `message` as if it had appeared at `now`.
    pub fn show_at(&mut self, level: ToastLevel, message: impl Into<String>, now: Instant) {
        let message = message.into();
        match level {
            ToastLevel::Error => tracing::warn!(%message, "toast"),
            ToastLevel::Info | ToastLevel::Success => tracing::info!(%message, "toast"),
        }
        self.current = Some(Toast {
            message,
            level,
            shown_at: now,
        });
    }

    /// Drops the toast once it has been visible for [`TOAST_DURATION`].
    pub fn expire(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|toast| now.saturating_duration_since(toast.shown_at) >= TOAST_DURATION)
        {
            self.current = None;
        }
    }

    /// The visible toast, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}
