//! Tests for the app module.
//!
//! This module is organized into submodules by functionality:
//! - `analysis` - Analysis trigger, single flight and failure recovery
//! - `helpers` - Shared test utilities and the scripted story service
//! - `input` - Paste handling, focus and key bindings
//! - `preview` - Preview modal bodies, ordering and dismissal
//! - `settings` - Settings panel and persistence
//! - `startup` - `App::new` from the working directory
//! - `ui` - Rendering, toasts and export
//! - `upload` - File validation, upload and the path prompt

#[allow(clippy::unwrap_used, clippy::expect_used)]
mod analysis;
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod ui;
