//! Editor input state and the requests derived from it.

use serde::Serialize;

use crate::core::FlowError;

/// Minimum number of characters (after trimming) required before an analysis
/// request is sent.
pub const MIN_INPUT_CHARS: usize = 10;

/// Snapshot of the three editor fields.
///
/// `main_text` is the user's working text. The long context and short memory
/// fields are optional; their fallbacks are computed per request and never
/// written back here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    /// Optional long-form context (earlier chapters, outline).
    pub long_context: String,
    /// Optional short memory (recent events the model should keep in mind).
    pub short_memory: String,
    /// The story text being written.
    pub main_text: String,
}

/// Word and character counts for the story text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCounts {
    /// Whitespace-separated tokens in the trimmed text.
    pub words: usize,
    /// Characters in the untrimmed text.
    pub chars: usize,
}

impl TextCounts {
    /// Counts words and characters in `text`.
    #[must_use]
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
        }
    }
}

impl InputState {
    /// Creates an input state holding only story text.
    #[must_use]
    pub fn with_text(main_text: impl Into<String>) -> Self {
        Self {
            main_text: main_text.into(),
            ..Self::default()
        }
    }

    /// Returns the word and character counts of the story text.
    #[must_use]
    pub fn counts(&self) -> TextCounts {
        TextCounts::of(&self.main_text)
    }

    /// Context sent with a preview request: the long context when filled in,
    /// otherwise the story text.
    #[must_use]
    pub fn story_context(&self) -> String {
        let long_context = self.long_context.trim();
        if long_context.is_empty() {
            self.main_text.trim().to_string()
        } else {
            long_context.to_string()
        }
    }
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Long context, or the last paragraph when no long context was given.
    pub full_context: String,
    /// Short memory, empty when not given.
    pub short_memory: String,
    /// The trimmed story text.
    pub last_paragraph: String,
}

impl AnalysisRequest {
    /// Derives the request from the current input.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InsufficientInput`] when the trimmed story text is
    /// shorter than [`MIN_INPUT_CHARS`] characters.
    pub fn from_input(input: &InputState) -> Result<Self, FlowError> {
        let last_paragraph = input.main_text.trim();
        let length = last_paragraph.chars().count();
        if length < MIN_INPUT_CHARS {
            return Err(FlowError::InsufficientInput { length });
        }

        let long_context = input.long_context.trim();
        let full_context = if long_context.is_empty() {
            last_paragraph
        } else {
            long_context
        };

        Ok(Self {
            full_context: full_context.to_string(),
            short_memory: input.short_memory.trim().to_string(),
            last_paragraph: last_paragraph.to_string(),
        })
    }
}
