//! Settings persistence and service configuration.
//!
//! Settings live as JSON in `.ghostwriter/settings.json`. Enum values are
//! stored by display name so that unknown or hand-edited values fall back to
//! defaults instead of failing to load.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::app::state::SettingsState;
use crate::core::PreviewOrdering;

/// Service address used when neither the command line nor the settings file
/// names one.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings saved between sessions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PersistedSettings {
    /// Preview ordering policy name ("Arrival" or "Latest").
    pub preview_ordering: String,
    /// Service base URL, if set in the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    /// Request timeout in seconds, if set in the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl PersistedSettings {
    /// Applies the persisted values to the settings panel state.
    pub fn apply_to(&self, state: &mut SettingsState) {
        state.preview_ordering = PreviewOrdering::from_name(&self.preview_ordering);
    }

    /// Copies the panel's editable values into these settings.
    ///
    /// Fields the panel cannot change are left as they were loaded.
    pub fn update_from(&mut self, state: &SettingsState) {
        self.preview_ordering = state.preview_ordering.name().to_string();
    }
}

/// Resolved service address and timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL of the story service.
    pub server_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    /// Resolves the configuration: command line (or environment) first, then
    /// the settings file, then defaults. Blank URLs and zero timeouts count as
    /// unset.
    #[must_use]
    pub fn resolve(
        cli_server: Option<&str>,
        cli_timeout_secs: Option<u64>,
        persisted: &PersistedSettings,
    ) -> Self {
        let server_url = cli_server
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .or_else(|| {
                persisted
                    .server_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
            })
            .unwrap_or(DEFAULT_SERVER_URL)
            .to_string();

        let timeout_secs = cli_timeout_secs
            .filter(|secs| *secs > 0)
            .or(persisted.request_timeout_secs.filter(|secs| *secs > 0))
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            server_url,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Loads settings from `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings(path: &Path) -> Result<PersistedSettings> {
    if !path.exists() {
        return Ok(PersistedSettings::default());
    }

    let content = std::fs::read_to_string(path).context("Failed to read settings file")?;
    serde_json::from_str(&content).context("Failed to parse settings file")
}

/// Saves settings to `path` as pretty-printed JSON.
///
/// The parent directory must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_settings(path: &Path, settings: &PersistedSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
    std::fs::write(path, json).context("Failed to write settings file")
}
