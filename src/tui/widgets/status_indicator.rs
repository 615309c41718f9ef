//! Compact one-line status indicator.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::state::UploadStatus;
use crate::core::TextCounts;
use crate::tui::Theme;

/// Status line: upload status on the left, counts and the analysis trigger
/// on the right.
pub struct StatusIndicatorWidget<'a> {
    upload: &'a UploadStatus,
    counts: TextCounts,
    trigger_label: &'a str,
    analyzing: bool,
    theme: &'a Theme,
}

impl<'a> StatusIndicatorWidget<'a> {
    /// Creates a new status indicator widget.
    #[must_use]
    pub const fn new(
        upload: &'a UploadStatus,
        counts: TextCounts,
        trigger_label: &'a str,
        analyzing: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            upload,
            counts,
            trigger_label,
            analyzing,
            theme,
        }
    }

    fn upload_icon(&self) -> &'static str {
        match self.upload {
            UploadStatus::Idle => "·",
            UploadStatus::Uploading(_) => "▶",
            UploadStatus::Loaded(_) => "",
        }
    }

    fn upload_style(&self) -> ratatui::style::Style {
        match self.upload {
            UploadStatus::Idle => self.theme.muted_style(),
            UploadStatus::Uploading(_) => self.theme.highlight_style(),
            UploadStatus::Loaded(_) => self.theme.success_style(),
        }
    }
}

impl Widget for StatusIndicatorWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let icon = self.upload_icon();
        let left = Line::from(vec![
            Span::styled(format!(" {icon} "), self.upload_style()),
            Span::styled(self.upload.text(), self.upload_style()),
        ]);
        Paragraph::new(left).render(area, buf);

        let trigger_style = if self.analyzing {
            self.theme.muted_style()
        } else {
            self.theme.highlight_style()
        };
        let right = Line::from(vec![
            Span::styled(
                format!("{} words · {} chars", self.counts.words, self.counts.chars),
                self.theme.muted_style(),
            ),
            Span::raw("  "),
            Span::styled(format!("[{}] ", self.trigger_label), trigger_style),
        ]);
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .render(area, buf);
    }
}
