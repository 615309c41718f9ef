//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Ghostwriter - terminal client for the story-analysis service
///
/// Write or upload a story, summon an analysis and preview where the story
/// could go next. If FILE is given it is uploaded at startup.
#[derive(Parser, Debug, Default)]
#[command(name = "ghostwriter", version, about, long_about = None)]
pub struct Args {
    /// Story file (.pdf or .txt) to upload on startup
    pub input_file: Option<PathBuf>,

    /// Base URL of the story service
    #[arg(long, env = "GHOSTWRITER_SERVER")]
    pub server: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}
