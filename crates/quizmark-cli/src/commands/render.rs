//! The `quizmark render` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::parser::parse_quiz_file;
use quizmark_render::html::{generate_preview_html, write_html};

pub fn execute(quiz_path: PathBuf, output: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::host_config(config_path.as_ref())?;

    let parsed = parse_quiz_file(&quiz_path, &config.defaults)?;
    super::report_diagnostics(&quiz_path, &parsed.diagnostics);
    anyhow::ensure!(
        !parsed.quiz.is_empty(),
        "{} has no usable questions",
        quiz_path.display()
    );

    let html = generate_preview_html(&parsed.quiz, &parsed.config);
    write_html(&html, &output)?;
    println!(
        "Rendered {} questions to {}",
        parsed.quiz.len(),
        output.display()
    );

    Ok(())
}
