//! The `quizmark validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::parser::{load_quiz_directory, parse_quiz_file, validate_quiz};

pub fn execute(quiz_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::host_config(config_path.as_ref())?;

    let quizzes = if quiz_path.is_dir() {
        load_quiz_directory(&quiz_path, &config.defaults)?
    } else {
        let parsed = parse_quiz_file(&quiz_path, &config.defaults)?;
        vec![(quiz_path.clone(), parsed)]
    };

    let mut total_issues = 0;
    let mut empty = 0;

    for (path, parsed) in &quizzes {
        println!("{}: {} questions", path.display(), parsed.quiz.len());

        for d in &parsed.diagnostics {
            println!("  {d}");
        }
        total_issues += parsed.diagnostics.len();

        let warnings = validate_quiz(parsed);
        for w in &warnings {
            let prefix = w
                .line
                .map(|line| format!("  [line {line}]"))
                .unwrap_or_else(|| " ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_issues += warnings.len();

        if parsed.quiz.is_empty() {
            empty += 1;
        }
    }

    if quizzes.is_empty() {
        anyhow::bail!("no quizzes found in {}", quiz_path.display());
    }
    if empty > 0 {
        anyhow::bail!("{empty} quiz file(s) have no usable questions");
    }

    if total_issues == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_issues} issue(s) found.");
    }

    Ok(())
}
