//! Render pipeline: analysis response to view model.
//!
//! [`render`] is a pure transformation. The app applies its output to the
//! results panel; [`UiModel::to_html`] produces the same content as markup for
//! export. Response text is untrusted in both targets: markup goes through
//! [`escape_markup`] and terminal output through [`terminal_safe`].

use std::fmt::Write as _;

use crate::core::model::{AnalysisResponse, Direction};

/// Genre shown when the service did not detect one.
pub const DEFAULT_GENRE: &str = "Unknown";

/// Tone shown when the service did not detect one.
pub const DEFAULT_TONE: &str = "Neutral";

/// Engine that produced an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineSource {
    /// A language model answered.
    Ai,
    /// The service fell back to its template engine.
    Template,
}

impl EngineSource {
    /// Classifies the `source` field. Only `"ai"` counts as the AI engine.
    #[must_use]
    pub fn from_source(source: Option<&str>) -> Self {
        if source == Some("ai") {
            Self::Ai
        } else {
            Self::Template
        }
    }

    /// Badge text for this engine.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ai => "✨ Gemini AI",
            Self::Template => "⚙ Templates",
        }
    }

    /// CSS class used in exported markup.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Ai => "badge-ai",
            Self::Template => "badge-template",
        }
    }
}

/// One of the three result badges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    /// Detected genre.
    Genre(String),
    /// Detected tone.
    Tone(String),
    /// Engine that answered.
    Engine(EngineSource),
}

impl Badge {
    /// Label printed before the value.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Genre(_) => "Genre",
            Self::Tone(_) => "Tone",
            Self::Engine(_) => "Engine",
        }
    }

    /// Value text of the badge.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Genre(value) | Self::Tone(value) => value,
            Self::Engine(source) => source.label(),
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            Self::Genre(_) => "badge-genre",
            Self::Tone(_) => "badge-tone",
            Self::Engine(source) => source.css_class(),
        }
    }
}

/// Everything the results panel shows for one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiModel {
    /// Genre, tone and engine, always in that order.
    pub badges: [Badge; 3],
    /// Entity tags in response order.
    pub entities: Vec<String>,
    /// Narrative bridge, `None` when the panel should hide it.
    pub bridge: Option<String>,
    /// Direction cards in display order.
    pub directions: Vec<Direction>,
}

/// Transforms an analysis response into the results view model.
#[must_use]
pub fn render(response: &AnalysisResponse) -> UiModel {
    let genre = non_empty(response.genre_detected.as_deref()).unwrap_or(DEFAULT_GENRE);
    let tone = non_empty(response.tone_detected.as_deref()).unwrap_or(DEFAULT_TONE);

    let directions = response
        .directions
        .iter()
        .flatten()
        .enumerate()
        .map(|(index, raw)| Direction::normalize(index, raw))
        .collect();

    UiModel {
        badges: [
            Badge::Genre(genre.to_string()),
            Badge::Tone(tone.to_string()),
            Badge::Engine(EngineSource::from_source(response.source.as_deref())),
        ],
        entities: response.key_entities.clone().unwrap_or_default(),
        bridge: non_empty(response.narrative_bridge.as_deref()).map(str::to_string),
        directions,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl UiModel {
    /// Returns the direction card at `index`, if any.
    #[must_use]
    pub fn direction(&self, index: usize) -> Option<&Direction> {
        self.directions.get(index)
    }

    /// Renders the model as an HTML fragment.
    ///
    /// Direction cards carry their name and description as `data-name` and
    /// `data-desc` attributes. Every interpolated value is escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<div class=\"badges\">");
        for badge in &self.badges {
            let _ = write!(
                html,
                "<div class=\"badge {}\"><span class=\"badge-label\">{}</span> {}</div>",
                badge.css_class(),
                badge.label(),
                escape_markup(badge.value())
            );
        }
        html.push_str("</div>\n<div class=\"entities\">");
        for entity in &self.entities {
            let _ = write!(html, "<span class=\"entity\">{}</span>", escape_markup(entity));
        }
        html.push_str("</div>\n");

        if let Some(bridge) = &self.bridge {
            let _ = writeln!(html, "<div class=\"bridge\">{}</div>", escape_markup(bridge));
        }

        html.push_str("<div class=\"directions\">");
        for direction in &self.directions {
            let name = escape_markup(&direction.name);
            let desc = escape_markup(&direction.description);
            let _ = write!(
                html,
                "<div class=\"direction\" data-name=\"{name}\" data-desc=\"{desc}\">\
                 <div class=\"direction-name\"><span class=\"num\">{}</span>{name}</div>\
                 <div class=\"direction-desc\">{desc}</div></div>",
                direction.number()
            );
        }
        html.push_str("</div>\n");

        html
    }

    /// Renders the model as a standalone HTML document.
    #[must_use]
    pub fn to_html_document(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Ghostwriter results</title>\n</head>\n<body>\n{}</body>\n</html>\n",
            self.to_html()
        )
    }
}

/// Escapes text for interpolation into HTML content or quoted attributes.
#[must_use]
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Strips control characters (except newlines) so response text cannot emit
/// terminal escape sequences. Tabs become spaces.
#[must_use]
pub fn terminal_safe(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}
