//! Single-flight busy flags.
//!
//! A [`BusyFlag`] is shared between the UI and the task running a request.
//! [`BusyFlag::try_acquire`] hands out at most one [`BusyGuard`] at a time;
//! the flag clears when the guard drops, on every exit path of the task
//! (normal return, error, or panic unwinding).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag marking an operation as in flight.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    busy: Arc<AtomicBool>,
}

impl BusyFlag {
    /// Creates an idle flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a guard is alive.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Marks the flag busy and returns the guard that releases it.
    ///
    /// Returns `None` if the flag is already busy; the caller must drop the
    /// request rather than queue it.
    #[must_use]
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Keeps a [`BusyFlag`] set until dropped.
#[derive(Debug)]
#[must_use = "the flag is released as soon as the guard is dropped"]
pub struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
