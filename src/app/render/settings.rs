//! Settings panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, SettingsItem};

impl App {
    /// Renders the settings panel as a centered overlay.
    pub(crate) fn render_settings(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_width = 64u16.min(area.width);
        let popup_height = 13u16.min(area.height);
        let x = area.width.saturating_sub(popup_width) / 2;
        let y = area.height.saturating_sub(popup_height) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let items = SettingsItem::all();
        let mut content_lines = Vec::new();

        content_lines.push(Line::from(Span::styled(
            "Ghostwriter Settings",
            self.theme.header_style(),
        )));
        content_lines.push(Line::from(Span::styled(
            "Saved to .ghostwriter/settings.json on close.",
            self.theme.muted_style(),
        )));
        content_lines.push(Line::from(""));

        let timeout = format!("{}s", self.config.request_timeout.as_secs());
        for (i, item) in items.iter().enumerate() {
            let is_selected = i == self.settings.selected_index;
            let prefix = if is_selected { "› " } else { "  " };

            let value = match item {
                SettingsItem::PreviewOrdering => self.settings.preview_ordering.name(),
                SettingsItem::ServerUrl => self.config.server_url.as_str(),
                SettingsItem::RequestTimeout => timeout.as_str(),
            };

            let line = if is_selected {
                Line::from(vec![
                    Span::styled(prefix, self.theme.highlight_style()),
                    Span::styled(
                        format!("{:<18}", item.label()),
                        self.theme.highlight_style(),
                    ),
                    Span::styled(format!("[{value}]"), self.theme.highlight_style()),
                ])
            } else {
                Line::from(vec![
                    Span::raw(prefix),
                    Span::styled(format!("{:<18}", item.label()), self.theme.normal_style()),
                    Span::styled(format!("[{value}]"), self.theme.muted_style()),
                ])
            };
            content_lines.push(line);
        }

        content_lines.push(Line::from(""));
        if let Some(item) = items.get(self.settings.selected_index) {
            content_lines.push(Line::from(Span::styled(
                item.description(),
                self.theme.muted_style(),
            )));
        }
        content_lines.push(Line::from(""));

        let change_hint = items
            .get(self.settings.selected_index)
            .is_some_and(SettingsItem::is_editable);
        let mut footer = vec![
            Span::styled("[↑/↓] ", self.theme.highlight_style()),
            Span::styled("Navigate  ", self.theme.muted_style()),
        ];
        if change_hint {
            footer.push(Span::styled("[Enter] ", self.theme.highlight_style()));
            footer.push(Span::styled("Change  ", self.theme.muted_style()));
        }
        footer.push(Span::styled("[Esc] ", self.theme.highlight_style()));
        footer.push(Span::styled("Close", self.theme.muted_style()));
        content_lines.push(Line::from(footer));

        let block = Block::default()
            .title(" Settings ")
            .title_style(self.theme.header_style())
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let paragraph = Paragraph::new(content_lines)
            .block(block)
            .alignment(ratatui::layout::Alignment::Left);

        frame.render_widget(paragraph, popup_area);
    }
}
