//! Compose view rendering.
//!
//! Draws the header, the three editors, the results panel, the status line
//! and the footer using the layout cached by `update_layout()`.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_textarea::TextArea;

use crate::app::{App, Focus};
use crate::tui::widgets::{ResultsView, ResultsWidget, StatusIndicatorWidget};

impl App {
    /// Renders the compose view.
    pub(crate) fn render_compose(&self, frame: &mut Frame) {
        let layout = self.layout.compose;

        self.render_header(frame, layout.header);

        self.render_editor(frame, layout.story, &self.editors.story, " Story ", Focus::Story);
        self.render_editor(
            frame,
            layout.long_context,
            &self.editors.long_context,
            " Long Context ",
            Focus::LongContext,
        );
        self.render_editor(
            frame,
            layout.short_memory,
            &self.editors.short_memory,
            " Short Memory ",
            Focus::ShortMemory,
        );

        self.render_results(frame, layout.results);
        self.render_status(frame, layout.status);
        self.render_footer(frame, layout.footer);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled(" Ghostwriter ", self.theme.header_style()),
            Span::styled("[", self.theme.muted_style()),
            Span::styled(self.config.server_url.as_str(), self.theme.normal_style()),
            Span::styled("]", self.theme.muted_style()),
        ]);
        frame.render_widget(Paragraph::new(header), area);
    }

    /// Renders one editor. Only the focused editor shows its cursor.
    fn render_editor(
        &self,
        frame: &mut Frame,
        area: Rect,
        source: &TextArea<'static>,
        title: &str,
        focus: Focus,
    ) {
        let focused = self.editors.focus == focus;
        let border_style = if focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };

        let block = Block::bordered()
            .title(title.to_string())
            .title_style(self.theme.header_style())
            .border_style(border_style);

        let mut textarea = source.clone();
        textarea.set_block(block);
        textarea.set_style(self.theme.normal_style());
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_style(self.theme.placeholder_style());
        if !focused {
            textarea.set_cursor_style(Style::default());
        }

        frame.render_widget(&textarea, area);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let view = if self.analysis.is_busy() {
            ResultsView::Loading
        } else if let Some(model) = self.analysis.visible_results() {
            ResultsView::Model(model)
        } else {
            ResultsView::Placeholder
        };

        let widget = ResultsWidget::new(view, self.analysis.scroll.offset, &self.theme)
            .selection(self.selected_card(), self.editors.focus == Focus::Directions);
        frame.render_widget(widget, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let widget = StatusIndicatorWidget::new(
            &self.upload.status,
            self.editors.counts(),
            self.analysis.trigger_label(),
            self.analysis.is_busy(),
            &self.theme,
        );
        frame.render_widget(widget, area);
    }

    /// Renders the footer with key hints for the focused panel.
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        let mut hint = |key: &'static str, action: &'static str| {
            spans.push(Span::styled(key, self.theme.highlight_style()));
            spans.push(Span::styled(action, self.theme.muted_style()));
        };

        if self.editors.focus == Focus::Directions {
            hint(" [↑/↓] ", "Select  ");
            hint("[Enter/1-9] ", "Preview  ");
        } else {
            hint(" [Ctrl+D] ", "Summon  ");
            hint("[Ctrl+O] ", "Upload  ");
        }
        hint("[Tab] ", "Focus  ");
        hint("[Ctrl+E] ", "Export  ");
        hint("[Ctrl+S] ", "Settings  ");
        hint("[Ctrl+C] ", "Quit");

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
