//! Results panel widget.
//!
//! Shows the badges, entity tags, narrative bridge and direction cards of a
//! [`UiModel`]. Lines are wrapped up front with [`layout_results`] so the app
//! can compute scroll bounds and keep the selected card in view using the
//! exact rows that get drawn.

use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
        Widget,
    },
};
use unicode_width::UnicodeWidthChar;

use crate::core::UiModel;
use crate::core::render::{Badge, terminal_safe};
use crate::tui::Theme;

/// Shown while an analysis is in flight.
pub const RESULTS_LOADING_TEXT: &str = "The ghost is reading your story...";

/// Shown before the first analysis and while results are hidden.
pub const RESULTS_PLACEHOLDER_TEXT: &str = "Write a few sentences and press Ctrl+D to summon the ghost.";

/// Hint under the selected card.
pub const CARD_HINT: &str = "Enter to preview this path";

const CARD_INDENT: &str = "   ";

/// What the results panel shows.
#[derive(Debug, Clone, Copy)]
pub enum ResultsView<'a> {
    /// Analysis in flight.
    Loading,
    /// Nothing to show.
    Placeholder,
    /// A rendered analysis.
    Model(&'a UiModel),
}

/// Wrapped rows of a [`UiModel`] and the rows each card occupies.
#[derive(Debug, Clone, Default)]
pub struct ResultsLines {
    /// One entry per visual row.
    pub lines: Vec<Line<'static>>,
    /// Row range of each direction card, in card order.
    pub cards: Vec<Range<usize>>,
}

impl ResultsLines {
    /// Total number of visual rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Wraps the model into visual rows for `content_width` columns.
///
/// `selected` marks one card with a `›` prefix and the preview hint.
#[must_use]
pub fn layout_results(
    model: &UiModel,
    content_width: usize,
    selected: Option<usize>,
    theme: &Theme,
) -> ResultsLines {
    let mut out = ResultsLines::default();

    let mut badges = Vec::new();
    for badge in &model.badges {
        if !badges.is_empty() {
            badges.push(Span::raw(" "));
        }
        let style = match badge {
            Badge::Engine(engine) => theme.engine_style(*engine),
            Badge::Genre(_) | Badge::Tone(_) => theme.badge_style(),
        };
        badges.push(Span::styled(
            format!(" {}: {} ", badge.label(), terminal_safe(badge.value())),
            style,
        ));
    }
    out.lines.push(Line::from(badges));

    if !model.entities.is_empty() {
        out.lines.push(Line::default());
        let tags = model
            .entities
            .iter()
            .map(|entity| format!("#{}", terminal_safe(entity)))
            .collect::<Vec<_>>()
            .join("  ");
        push_wrapped(&mut out.lines, &tags, "", content_width, theme.entity_style());
    }

    if let Some(bridge) = &model.bridge {
        out.lines.push(Line::default());
        push_wrapped(
            &mut out.lines,
            &terminal_safe(bridge),
            "",
            content_width,
            theme.normal_style().add_modifier(Modifier::ITALIC),
        );
    }

    if !model.directions.is_empty() {
        out.lines.push(Line::default());
        out.lines
            .push(Line::from(Span::styled("Directions", theme.header_style())));
    }

    for (i, direction) in model.directions.iter().enumerate() {
        let is_selected = selected == Some(i);
        let start = out.lines.len();

        let (prefix, title_style) = if is_selected {
            ("› ", theme.highlight_style())
        } else {
            ("  ", theme.card_title_style())
        };
        let title = format!("{}. {}", direction.number(), terminal_safe(&direction.name));
        push_wrapped(&mut out.lines, &title, prefix, content_width, title_style);

        if !direction.description.is_empty() {
            push_wrapped(
                &mut out.lines,
                &terminal_safe(&direction.description),
                CARD_INDENT,
                content_width,
                theme.muted_style(),
            );
        }
        if is_selected {
            push_wrapped(
                &mut out.lines,
                CARD_HINT,
                CARD_INDENT,
                content_width,
                theme.placeholder_style(),
            );
        }

        out.cards.push(start..out.lines.len());
        out.lines.push(Line::default());
    }

    out
}

/// Wraps `text` to `width` columns, indenting every row by `prefix`.
///
/// Newlines in `text` start new rows.
fn push_wrapped(
    lines: &mut Vec<Line<'static>>,
    text: &str,
    prefix: &str,
    width: usize,
    style: ratatui::style::Style,
) {
    let prefix_width = prefix.chars().filter_map(|c| c.width()).sum::<usize>();
    let text_width = width.saturating_sub(prefix_width);
    let pad = " ".repeat(prefix_width);

    let mut first = true;
    for paragraph in text.split('\n') {
        for row in wrap_line_to_width(paragraph, text_width) {
            let lead = if first { prefix.to_string() } else { pad.clone() };
            first = false;
            lines.push(Line::from(vec![Span::styled(lead, style), Span::styled(row, style)]));
        }
    }
}

/// Wraps a single line of text to fit within the given width.
///
/// Uses Unicode-aware width calculation so wide characters are not split
/// across the border.
fn wrap_line_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut result = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let char_width = ch.width().unwrap_or(0);

        if current_width + char_width > width && !current_line.is_empty() {
            result.push(std::mem::take(&mut current_line));
            current_width = 0;
        }

        current_line.push(ch);
        current_width += char_width;
    }

    result.push(current_line);
    result
}

/// Widget for the results panel.
pub struct ResultsWidget<'a> {
    view: ResultsView<'a>,
    selected: Option<usize>,
    scroll_offset: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultsWidget<'a> {
    /// Creates a new results widget.
    #[must_use]
    pub const fn new(view: ResultsView<'a>, scroll_offset: usize, theme: &'a Theme) -> Self {
        Self {
            view,
            selected: None,
            scroll_offset,
            focused: false,
            theme,
        }
    }

    /// Marks the selected card and whether the cards have keyboard focus.
    #[must_use]
    pub const fn selection(mut self, selected: Option<usize>, focused: bool) -> Self {
        self.selected = selected;
        self.focused = focused;
        self
    }
}

impl Widget for ResultsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };
        let base_block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner_area = base_block.inner(area);
        let visible_height = inner_area.height as usize;
        let content_width = inner_area.width.saturating_sub(1) as usize;

        let lines = match self.view {
            ResultsView::Loading => vec![Line::from(Span::styled(
                RESULTS_LOADING_TEXT,
                self.theme.highlight_style(),
            ))],
            ResultsView::Placeholder => vec![Line::from(Span::styled(
                RESULTS_PLACEHOLDER_TEXT,
                self.theme.placeholder_style(),
            ))],
            ResultsView::Model(model) => {
                layout_results(model, content_width, self.selected, self.theme).lines
            }
        };
        let total = lines.len();

        let scroll_info = if total > visible_height {
            format!(
                " ({}-{}/{})",
                self.scroll_offset + 1,
                (self.scroll_offset + visible_height).min(total),
                total
            )
        } else {
            String::new()
        };

        base_block
            .title(Line::from(Span::styled(
                format!("Ghost{scroll_info}"),
                self.theme.header_style(),
            )))
            .render(area, buf);

        let visible: Vec<Line> = lines
            .into_iter()
            .skip(self.scroll_offset)
            .take(visible_height)
            .collect();
        Paragraph::new(visible).render(inner_area, buf);

        if total > visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"))
                .track_symbol(Some("│"))
                .thumb_symbol("█")
                .track_style(self.theme.scrollbar_track_style())
                .thumb_style(self.theme.scrollbar_thumb_style());

            let mut scrollbar_state = ScrollbarState::new(total)
                .position(self.scroll_offset)
                .viewport_content_length(visible_height);

            scrollbar.render(inner_area, buf, &mut scrollbar_state);
        }
    }
}
