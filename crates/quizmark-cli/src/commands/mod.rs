pub mod init;
pub mod play;
pub mod render;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

use quizmark_bridge::config::{load_config_from, QuizmarkConfig};

/// Load the host config, from `path` if given.
pub fn host_config(path: Option<&PathBuf>) -> Result<QuizmarkConfig> {
    load_config_from(path.map(PathBuf::as_path))
}

/// Print parse diagnostics for `path` to stderr.
pub fn report_diagnostics(path: &Path, diagnostics: &[quizmark_core::Diagnostic]) {
    for d in diagnostics {
        eprintln!("{}: {d}", path.display());
    }
}
