//! The `quizmark play` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

use quizmark_bridge::{BridgeError, HostBridge, RoutingLoader};
use quizmark_core::model::QuestionKind;
use quizmark_core::parser::parse_quiz_file;
use quizmark_core::report::ResultsReport;
use quizmark_core::scoring::Answer;
use quizmark_core::session::{Session, SessionState};
use quizmark_core::traits::AssetLoader;
use quizmark_render::html::{generate_results_html, write_html};

use crate::terminal::TerminalSurface;

pub async fn execute(
    quiz_path: PathBuf,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    html: Option<PathBuf>,
) -> Result<()> {
    let config = super::host_config(config_path.as_ref())?;

    let parsed = parse_quiz_file(&quiz_path, &config.defaults)?;
    super::report_diagnostics(&quiz_path, &parsed.diagnostics);
    let session = Session::from_parsed(parsed)
        .with_context(|| format!("cannot play {}", quiz_path.display()))?;

    let loader: Arc<dyn AssetLoader> = match config.load_timeout_secs {
        Some(secs) => Arc::new(RoutingLoader::with_timeout(Duration::from_secs(secs))?),
        None => Arc::new(RoutingLoader::new()),
    };

    let mut bridge = HostBridge::new(
        config.container.clone(),
        session,
        config.assets.clone(),
        loader,
        TerminalSurface::stdout(),
    );

    match config.load_timeout_secs {
        Some(secs) => {
            let timed_out =
                tokio::time::timeout(Duration::from_secs(secs), bridge.load_dependencies())
                    .await
                    .is_err();
            if timed_out {
                bridge.mark_unavailable("dependencies", format!("timed out after {secs}s"));
            }
        }
        None => {
            bridge.load_dependencies().await;
        }
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    bridge.start_with_rng(&mut rng)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while bridge.session().state() == SessionState::InProgress {
        let Some((position, kind, count)) = bridge
            .session()
            .current_question()
            .map(|q| (q.position, q.question.kind, q.choices.len()))
        else {
            break;
        };

        let Some(line) = lines.next_line().await? else {
            anyhow::bail!("input ended before the quiz was finished");
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("h") {
            match bridge.session().hint(position) {
                Some(hint) => println!("Hint: {hint}"),
                None => println!("No hint for this question."),
            }
            continue;
        }

        let answer = match parse_answer(kind, line, count) {
            Ok(answer) => answer,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match bridge.submit_answer(position, answer) {
            Ok(true) => println!("Correct!"),
            Ok(false) => println!("Not quite."),
            Err(BridgeError::Session(e)) => println!("Invalid answer: {e}"),
            Err(e) => return Err(e.into()),
        }
    }

    let report = ResultsReport::from_session(bridge.session());
    print_results_table(&report);

    if let Some(path) = output {
        report.save_json(&path)?;
        println!("Results saved to {}", path.display());
    }
    if let Some(path) = html {
        let page = generate_results_html(&report, bridge.session().config());
        write_html(&page, &path)?;
        println!("Results page written to {}", path.display());
    }

    bridge.finish()?;
    bridge.unmount();
    Ok(())
}

/// Turn typed input like `2`, `1,3` or `3 1 2` into an answer.
///
/// Numbers are 1-based as shown on screen. Shape problems, such as two
/// numbers for a single-choice question, are left for the session to reject.
fn parse_answer(kind: QuestionKind, input: &str, count: usize) -> Result<Answer> {
    let picks = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            let n: usize = s
                .parse()
                .with_context(|| format!("'{s}' is not a choice number"))?;
            anyhow::ensure!(
                (1..=count).contains(&n),
                "choose numbers between 1 and {count}"
            );
            Ok(n - 1)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(match kind {
        QuestionKind::SingleChoice if picks.len() == 1 => Answer::Single(picks[0]),
        QuestionKind::SingleChoice | QuestionKind::MultiChoice => Answer::Multiple(picks),
        QuestionKind::Ordering => Answer::Ordering(picks),
    })
}

fn print_results_table(report: &ResultsReport) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Kind", "Your answer", "Result"]);

    for r in &report.results {
        table.add_row(vec![
            Cell::new(r.position + 1),
            Cell::new(&r.prompt),
            Cell::new(r.kind),
            Cell::new(r.submitted_text.join(", ")),
            Cell::new(if r.correct { "correct" } else { "wrong" }),
        ]);
    }

    println!("\n{table}");
    println!(
        "Score: {}/{} ({:.0}%)",
        report.score,
        report.total,
        report.ratio() * 100.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_based_numbers() {
        assert_eq!(
            parse_answer(QuestionKind::SingleChoice, "2", 4).unwrap(),
            Answer::Single(1)
        );
        assert_eq!(
            parse_answer(QuestionKind::MultiChoice, "1, 3", 4).unwrap(),
            Answer::Multiple(vec![0, 2])
        );
        assert_eq!(
            parse_answer(QuestionKind::Ordering, "3 1 2", 3).unwrap(),
            Answer::Ordering(vec![2, 0, 1])
        );
    }

    #[test]
    fn two_picks_for_single_choice_become_multiple() {
        assert_eq!(
            parse_answer(QuestionKind::SingleChoice, "1,2", 3).unwrap(),
            Answer::Multiple(vec![0, 1])
        );
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(parse_answer(QuestionKind::SingleChoice, "0", 3).is_err());
        assert!(parse_answer(QuestionKind::SingleChoice, "4", 3).is_err());
        let err = parse_answer(QuestionKind::MultiChoice, "a,b", 3).unwrap_err();
        assert!(err.to_string().contains("not a choice number"));
    }
}
