//! Wire types exchanged with the story service.
//!
//! Everything the service sends back is treated as partially optional: a
//! missing or `null` field deserializes to its default instead of failing the
//! whole response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reply of `POST /api/analyze`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisResponse {
    /// Genre guessed by the service.
    pub genre_detected: Option<String>,
    /// Tone guessed by the service.
    pub tone_detected: Option<String>,
    /// Which engine produced the answer (`"ai"` or `"template"`).
    pub source: Option<String>,
    /// Characters, places and objects the service picked out.
    pub key_entities: Option<Vec<String>>,
    /// Connective text from the story into the directions.
    pub narrative_bridge: Option<String>,
    /// Candidate continuations, in display order.
    pub directions: Option<Vec<RawDirection>>,
}

/// A direction exactly as the service sent it.
///
/// Older service versions send bare strings, newer ones send objects.
/// Anything else is kept as raw JSON and flattened during normalization.
/// Only JSON objects become [`RawDirection::Structured`]; arrays never do.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RawDirection {
    /// A bare string, used as the description.
    Bare(String),
    /// An object with optional `name` and `description`.
    ///
    /// Members that are not strings count as missing.
    Structured {
        name: Option<String>,
        description: Option<String>,
    },
    /// Any other JSON value.
    Other(Value),
}

impl From<Value> for RawDirection {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Bare(text),
            Value::Object(map) => {
                let field = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
                Self::Structured {
                    name: field("name"),
                    description: field("description"),
                }
            }
            other => Self::Other(other),
        }
    }
}

/// A normalized direction, ready for display and preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Direction {
    /// Position in the response (0-based).
    pub index: usize,
    /// Display name, `"Path N"` when the service sent none.
    pub name: String,
    /// Description, empty when the service sent none.
    pub description: String,
}

impl Direction {
    /// Number shown on the card (1-based).
    #[must_use]
    pub const fn number(&self) -> usize {
        self.index + 1
    }

    /// Resolves a raw direction at position `index`.
    #[must_use]
    pub fn normalize(index: usize, raw: &RawDirection) -> Self {
        let (name, description) = match raw {
            RawDirection::Bare(text) => (None, text.clone()),
            RawDirection::Structured { name, description } => {
                (name.clone(), description.clone().unwrap_or_default())
            }
            RawDirection::Other(value) => flatten_value(value),
        };

        Self {
            index,
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| default_direction_name(index)),
            description,
        }
    }
}

/// Name given to direction `index` when the service left it out.
#[must_use]
pub fn default_direction_name(index: usize) -> String {
    format!("Path {}", index + 1)
}

fn flatten_value(value: &Value) -> (Option<String>, String) {
    match value {
        Value::Null => (None, String::new()),
        Value::String(text) => (None, text.clone()),
        Value::Object(map) => {
            let field = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
            (field("name"), field("description").unwrap_or_default())
        }
        Value::Bool(_) | Value::Number(_) => (None, value.to_string()),
        // Arrays carry neither member
        Value::Array(_) => (None, String::new()),
    }
}

/// Body of `POST /api/expand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    /// Long context, or the story text when no long context was given.
    pub story_context: String,
    /// Name of the selected direction.
    pub path_name: String,
    /// Description of the selected direction.
    pub path_description: String,
}

/// Reply of `POST /api/expand`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreviewResult {
    /// A few sentences continuing the story along the chosen path.
    pub preview: Option<String>,
}

/// Raw reply of `POST /api/upload`: either the extracted text or an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UploadReply {
    /// Extracted story text.
    pub text: Option<String>,
    /// Name of the uploaded file as the service saw it.
    pub filename: Option<String>,
    /// Error reported by the service.
    pub error: Option<String>,
}

/// A successfully uploaded story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedStory {
    /// Text extracted from the file.
    pub text: String,
    /// File name reported back by the service.
    pub filename: String,
}

/// A file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name without directories.
    pub filename: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}
