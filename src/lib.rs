//! Ghostwriter - terminal writing assistant
//!
//! Sends a story to the analysis service and browses the suggested
//! directions, each expandable into a short preview.

pub mod app;
pub mod cli;
pub mod core;
pub mod fs;
pub mod logging;
pub mod service;
pub mod tui;
