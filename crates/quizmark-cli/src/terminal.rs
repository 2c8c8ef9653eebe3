//! Plain-text surface for terminal sessions.

use std::io::Write;

use quizmark_core::model::{Block, QuestionKind, QuizConfig};
use quizmark_core::session::QuestionView;
use quizmark_core::traits::{Surface, View};

/// Prints every view to a writer, stdout by default. Alerts go to stderr.
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> TerminalSurface<W> {
    #[cfg(test)]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_view(&mut self, view: &View<'_>) -> std::io::Result<()> {
        let out = &mut self.out;
        match view {
            View::Loading => writeln!(out, "Loading quiz...")?,
            View::Unavailable { message } => writeln!(out, "{message}")?,
            View::Ready { title, total } => writeln!(out, "{title} ({total} questions)")?,
            View::Question(q) => write_question(out, q)?,
            View::Review {
                results,
                score,
                total,
            } => {
                writeln!(out, "\nReview: {score}/{total} correct")?;
                for r in results.iter() {
                    let mark = if r.correct { "correct" } else { "wrong" };
                    writeln!(out, "\n{}. {} [{mark}]", r.position + 1, r.prompt)?;
                    for c in &r.choices {
                        let flag = match (c.is_correct, c.selected) {
                            (true, true) => "*+",
                            (true, false) => " +",
                            (false, true) => "* ",
                            (false, false) => "  ",
                        };
                        writeln!(out, "   {flag} {}", c.text)?;
                        if let Some(explanation) = &c.explanation {
                            writeln!(out, "        {explanation}")?;
                        }
                    }
                    if r.kind == QuestionKind::Ordering {
                        writeln!(out, "   your order: {}", r.submitted_text.join(", "))?;
                    }
                }
            }
            View::Finished { score, total } => writeln!(out, "\nFinished with {score}/{total}.")?,
        }
        out.flush()
    }
}

fn write_question<W: Write>(out: &mut W, q: &QuestionView<'_>) -> std::io::Result<()> {
    let question = q.question;
    writeln!(
        out,
        "\nQuestion {}/{}: {}",
        q.position + 1,
        q.total,
        question.prompt
    )?;
    for block in &question.body {
        match block {
            Block::Paragraph { text } => writeln!(out, "{text}")?,
            Block::Code { source, .. } => {
                for line in source.lines() {
                    writeln!(out, "    {line}")?;
                }
            }
        }
    }
    if let Some(media) = &question.media {
        writeln!(out, "[image: {media}]")?;
    }
    for (i, choice) in q.choices.iter().enumerate() {
        writeln!(out, "  {}. {choice}", i + 1)?;
    }
    let how = match question.kind {
        QuestionKind::SingleChoice => "Pick one (e.g. 2)",
        QuestionKind::MultiChoice => "Pick all that apply (e.g. 1,3)",
        QuestionKind::Ordering => "Put in order (e.g. 3,1,2)",
    };
    if question.hint.is_some() {
        writeln!(out, "{how}, or h for a hint:")
    } else {
        writeln!(out, "{how}:")
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn render(&mut self, _container: &str, _config: &QuizConfig, view: &View<'_>) {
        if let Err(e) = self.write_view(view) {
            tracing::warn!("failed to write {} view: {e}", view.name());
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
