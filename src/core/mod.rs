//! Core story logic: input validation, flows, rendering and modal state.

pub mod busy;
pub mod error;
pub mod flows;
pub mod input;
pub mod model;
pub mod notify;
pub mod preview;
pub mod render;

pub use busy::{BusyFlag, BusyGuard};
pub use error::FlowError;
pub use flows::{analyze_story, check_upload_extension, preview_direction, upload_story};
pub use input::{AnalysisRequest, InputState, MIN_INPUT_CHARS, TextCounts};
pub use model::{AnalysisResponse, Direction, PreviewRequest, RawDirection};
pub use notify::{Notifications, Toast, ToastLevel};
pub use preview::{PreviewBody, PreviewModal, PreviewOrdering};
pub use render::{UiModel, escape_markup, render, terminal_safe};
