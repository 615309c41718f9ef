//! File system locations and persistence.

use std::path::{Path, PathBuf};

use anyhow::Context;

pub mod settings;

pub use settings::{
    DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS, PersistedSettings, ServiceConfig, load_settings,
    save_settings,
};

/// Name of the per-project state directory.
pub const GHOSTWRITER_DIR: &str = ".ghostwriter";

/// Holds all ghostwriter paths derived from a base directory.
///
/// Tests root this in a temporary directory; the binary uses the working
/// directory.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use ghostwriter::fs::GhostwriterPaths;
///
/// let paths = GhostwriterPaths::new(Path::new("/tmp/story"));
/// assert_eq!(
///     paths.settings_file(),
///     Path::new("/tmp/story/.ghostwriter/settings.json")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct GhostwriterPaths {
    base: PathBuf,
}

impl GhostwriterPaths {
    /// Creates paths rooted at the given base directory.
    #[must_use]
    pub fn new(base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
        }
    }

    /// Creates paths rooted at the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn from_cwd() -> anyhow::Result<Self> {
        let base = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self { base })
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns the `.ghostwriter` directory path.
    #[must_use]
    pub fn ghostwriter_dir(&self) -> PathBuf {
        self.base.join(GHOSTWRITER_DIR)
    }

    /// Returns the settings file path (`.ghostwriter/settings.json`).
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.ghostwriter_dir().join("settings.json")
    }

    /// Returns the log directory (`.ghostwriter/logs`).
    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.ghostwriter_dir().join("logs")
    }

    /// Returns the export target (`.ghostwriter/results.html`).
    #[must_use]
    pub fn results_file(&self) -> PathBuf {
        self.ghostwriter_dir().join("results.html")
    }

    /// Ensures the `.ghostwriter` directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_ghostwriter_dir(&self) -> anyhow::Result<()> {
        let dir = self.ghostwriter_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))
    }

    /// Loads settings, returning defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_settings(&self) -> anyhow::Result<PersistedSettings> {
        load_settings(&self.settings_file())
    }

    /// Saves settings, creating `.ghostwriter` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot be written.
    pub fn save_settings(&self, settings: &PersistedSettings) -> anyhow::Result<()> {
        self.ensure_ghostwriter_dir()?;
        save_settings(&self.settings_file(), settings)
    }

    /// Writes an exported results document and returns where it went.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot be written.
    pub fn write_results(&self, html: &str) -> anyhow::Result<PathBuf> {
        self.ensure_ghostwriter_dir()?;
        let path = self.results_file();
        std::fs::write(&path, html)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
