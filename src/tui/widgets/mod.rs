//! Custom TUI widgets.

pub mod results;
pub mod status_indicator;

pub use results::{ResultsLines, ResultsView, ResultsWidget, layout_results};
pub use status_indicator::StatusIndicatorWidget;
