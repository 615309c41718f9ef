//! Upload prompt, preview modal and toast rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, preview_modal_area, upload_prompt_area};
use crate::core::PreviewBody;
use crate::core::render::terminal_safe;

impl App {
    /// Renders the upload path prompt.
    pub(crate) fn render_upload_prompt(&self, frame: &mut Frame) {
        let area = upload_prompt_area(frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Load Story ")
            .title_style(self.theme.header_style())
            .title_bottom(Line::from(vec![
                Span::styled(" [Enter] ", self.theme.highlight_style()),
                Span::styled("Upload  ", self.theme.muted_style()),
                Span::styled("[Esc] ", self.theme.highlight_style()),
                Span::styled("Cancel ", self.theme.muted_style()),
            ]))
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let hint = Line::from(Span::styled(
            "Path to a .pdf or .txt file:",
            self.theme.muted_style(),
        ));
        let hint_area = Rect::new(inner.x, inner.y, inner.width, 1.min(inner.height));
        frame.render_widget(Paragraph::new(hint), hint_area);

        let input_area = Rect::new(
            inner.x,
            inner.y.saturating_add(2),
            inner.width,
            inner.height.saturating_sub(2).min(1),
        );
        let mut prompt = self.upload.prompt.clone();
        prompt.set_style(self.theme.normal_style());
        prompt.set_cursor_line_style(Style::default());
        prompt.set_placeholder_style(self.theme.placeholder_style());
        frame.render_widget(&prompt, input_area);
    }

    /// Renders the preview modal over a cleared backdrop.
    pub(crate) fn render_preview(&self, frame: &mut Frame) {
        let area = preview_modal_area(frame.area());
        frame.render_widget(Clear, area);

        let body = self.preview.body();
        let body_style = match body {
            PreviewBody::Loading => self.theme.highlight_style(),
            PreviewBody::Text(_) => self.theme.normal_style(),
            PreviewBody::Empty => self.theme.muted_style(),
            PreviewBody::Failed => self.theme.error_style(),
        };

        let block = Block::default()
            .title(Line::from(vec![
                Span::styled(" ", self.theme.header_style()),
                Span::styled(terminal_safe(self.preview.title()), self.theme.header_style()),
                Span::styled(" ", self.theme.header_style()),
            ]))
            .title_bottom(Line::from(vec![
                Span::styled(" [x/Esc] ", self.theme.highlight_style()),
                Span::styled("Close ", self.theme.muted_style()),
            ]))
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style());

        let paragraph = Paragraph::new(terminal_safe(body.text()))
            .style(body_style)
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, area);
    }

    /// Renders the current toast, if any, above the status line.
    pub(crate) fn render_toast(&self, frame: &mut Frame) {
        let Some(toast) = self.notifications.current() else {
            return;
        };

        let screen = frame.area();
        let text = format!(" {} ", terminal_safe(&toast.message));
        let width = u16::try_from(unicode_width::UnicodeWidthStr::width(text.as_str()))
            .unwrap_or(u16::MAX)
            .min(screen.width);
        if width == 0 || screen.height < 3 {
            return;
        }

        // Bottom-centered, just above the status and footer lines
        let x = screen.x + (screen.width - width) / 2;
        let y = screen.y + screen.height - 3;
        let area = Rect::new(x, y, width, 1);

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(text).style(self.theme.toast_style(toast.level)),
            area,
        );
    }
}
