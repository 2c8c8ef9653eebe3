//! Quiz markup parser.
//!
//! Turns quiz markup (front matter followed by heading-separated question
//! blocks) into an immutable [`Quiz`] and its [`QuizConfig`]. Problems are
//! recovered locally and reported as [`Diagnostic`]s.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::{Diagnostic, DiagnosticKind};
use crate::frontmatter::split_front_matter;
use crate::lexer::{Lexer, Token, TokenWithLine};
use crate::model::{Block, Choice, Question, QuestionKind, Quiz, QuizConfig};

/// File extensions picked up when loading a directory of quizzes.
pub const QUIZ_EXTENSIONS: &[&str] = &["md", "markdown", "quiz"];

/// Output of [`parse_quiz`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuiz {
    pub quiz: Quiz,
    pub config: QuizConfig,
    /// Recovered problems, ordered by source line.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedQuiz {
    /// Number of question blocks that were dropped.
    pub fn dropped(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.kind.drops_question())
            .count()
    }
}

/// Parse quiz markup with the built-in default configuration.
pub fn parse_quiz(source: &str) -> ParsedQuiz {
    parse_quiz_with(source, &QuizConfig::default())
}

/// Parse quiz markup, using `base` for every field the front matter leaves unset.
pub fn parse_quiz_with(source: &str, base: &QuizConfig) -> ParsedQuiz {
    let front = split_front_matter(source, base);
    let mut diagnostics = front.diagnostics;

    let (tokens, lex_diagnostics) = Lexer::new(front.body).tokenize(front.body_offset);
    diagnostics.extend(lex_diagnostics);

    let mut questions = Vec::new();
    let mut builder: Option<BlockBuilder> = None;
    let mut stray_reported = false;

    for TokenWithLine { token, line } in tokens {
        if let Token::Heading { text } = token {
            if let Some(done) = builder.take() {
                finish_block(done, &mut questions, &mut diagnostics);
            }
            builder = Some(BlockBuilder::new(text, line));
            continue;
        }

        match builder.as_mut() {
            Some(b) => b.push(token),
            None => {
                if token != Token::Blank && !stray_reported {
                    diagnostics.push(Diagnostic::new(line, DiagnosticKind::StrayContent));
                    stray_reported = true;
                }
            }
        }
    }
    if let Some(done) = builder.take() {
        finish_block(done, &mut questions, &mut diagnostics);
    }

    diagnostics.sort_by_key(|d| d.line);
    tracing::debug!(
        questions = questions.len(),
        diagnostics = diagnostics.len(),
        "parsed quiz markup"
    );

    ParsedQuiz {
        quiz: Quiz { questions },
        config: front.config,
        diagnostics,
    }
}

fn finish_block(
    builder: BlockBuilder,
    questions: &mut Vec<Question>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let line = builder.line;
    match builder.build() {
        Ok(question) => questions.push(question),
        Err(kind) => {
            tracing::warn!("dropping question at line {line}: {kind}");
            diagnostics.push(Diagnostic::new(line, kind));
        }
    }
}

// ---------------------------------------------------------------------------
// Question block assembly
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct RawItem {
    ordered: bool,
    checkbox: Option<bool>,
    text: String,
    explanation: Vec<String>,
}

/// Accumulates the tokens of one question block.
#[derive(Debug)]
struct BlockBuilder {
    prompt: String,
    line: usize,
    body: Vec<Block>,
    paragraph: Vec<String>,
    hints: Vec<String>,
    media: Option<String>,
    items: Vec<RawItem>,
    /// The last non-blank token belonged to the answer list.
    in_list: bool,
}

impl BlockBuilder {
    fn new(prompt: String, line: usize) -> Self {
        Self {
            prompt,
            line,
            body: Vec::new(),
            paragraph: Vec::new(),
            hints: Vec::new(),
            media: None,
            items: Vec::new(),
            in_list: false,
        }
    }

    fn push(&mut self, token: Token) {
        match token {
            Token::Blank => self.flush_paragraph(),
            // Split off by the caller; a block never sees its own heading.
            Token::Heading { .. } => {}
            Token::Quote { text, indent } => {
                if self.in_list && indent > 0 {
                    if let Some(item) = self.items.last_mut() {
                        item.explanation.push(text);
                    }
                } else {
                    self.flush_paragraph();
                    self.hints.push(text);
                    self.in_list = false;
                }
            }
            // A bullet list without checkboxes is ordinary content, not answers.
            Token::Item {
                ordered: false,
                checkbox: None,
                raw,
                ..
            } => {
                self.in_list = false;
                self.paragraph.push(raw);
            }
            Token::Item {
                ordered,
                checkbox,
                text,
                ..
            } => {
                self.flush_paragraph();
                self.items.push(RawItem {
                    ordered,
                    checkbox,
                    text,
                    explanation: Vec::new(),
                });
                self.in_list = true;
            }
            Token::Image { alt, url } => {
                if self.media.is_none() {
                    self.media = Some(url);
                } else {
                    self.paragraph.push(format!("![{alt}]({url})"));
                }
            }
            Token::Fence { lang, source } => {
                self.flush_paragraph();
                self.body.push(Block::Code { lang, source });
                self.in_list = false;
            }
            Token::Text { text, indent } => {
                if self.in_list && indent > 0 {
                    if let Some(item) = self.items.last_mut() {
                        if item.text.is_empty() {
                            item.text = text;
                        } else {
                            item.text.push(' ');
                            item.text.push_str(&text);
                        }
                    }
                } else {
                    self.in_list = false;
                    self.paragraph.push(text);
                }
            }
        }
    }

    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let text = self.paragraph.join("\n");
            self.paragraph.clear();
            self.body.push(Block::Paragraph { text });
        }
    }

    fn build(mut self) -> Result<Question, DiagnosticKind> {
        self.flush_paragraph();
        let prompt = self.prompt.clone();

        let Some(first) = self.items.first() else {
            return Err(DiagnosticKind::NoAnswers { prompt });
        };
        let checked = first.checkbox.is_some();
        let ordered = first.ordered;
        if self
            .items
            .iter()
            .any(|i| i.checkbox.is_some() != checked || i.ordered != ordered)
        {
            return Err(DiagnosticKind::MixedListStyles { prompt });
        }

        let kind = match (checked, ordered) {
            (true, true) => QuestionKind::SingleChoice,
            (true, false) => QuestionKind::MultiChoice,
            (false, _) => QuestionKind::Ordering,
        };

        let correct = self
            .items
            .iter()
            .filter(|i| i.checkbox == Some(true))
            .count();
        match kind {
            QuestionKind::SingleChoice if correct == 0 => {
                return Err(DiagnosticKind::NoCorrectChoice { prompt })
            }
            QuestionKind::SingleChoice if correct > 1 => {
                return Err(DiagnosticKind::MultipleCorrectChoices {
                    prompt,
                    count: correct,
                })
            }
            QuestionKind::MultiChoice if correct == 0 => {
                return Err(DiagnosticKind::NoCorrectChoice { prompt })
            }
            QuestionKind::Ordering if self.items.len() < 2 => {
                return Err(DiagnosticKind::TooFewOrderingItems { prompt })
            }
            _ => {}
        }

        let choices = self
            .items
            .into_iter()
            .map(|i| Choice {
                text: i.text,
                is_correct: i.checkbox == Some(true),
                explanation: (!i.explanation.is_empty()).then(|| i.explanation.join("\n")),
            })
            .collect();

        Ok(Question {
            prompt,
            body: self.body,
            hint: (!self.hints.is_empty()).then(|| self.hints.join("\n")),
            media: self.media,
            kind,
            choices,
            line: self.line,
        })
    }
}

// ---------------------------------------------------------------------------
// Loading from disk
// ---------------------------------------------------------------------------

/// Read and parse a single quiz file.
pub fn parse_quiz_file(path: &Path, base: &QuizConfig) -> Result<ParsedQuiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    Ok(parse_quiz_with(&content, base))
}

/// Recursively load every quiz file from a directory.
///
/// Unreadable files and files without any usable question are skipped.
pub fn load_quiz_directory(dir: &Path, base: &QuizConfig) -> Result<Vec<(PathBuf, ParsedQuiz)>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path, base)?);
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| QUIZ_EXTENSIONS.contains(&ext))
        {
            match parse_quiz_file(&path, base) {
                Ok(parsed) if parsed.quiz.is_empty() => {
                    tracing::warn!("skipping {}: no usable questions", path.display());
                }
                Ok(parsed) => quizzes.push((path, parsed)),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A warning about a quiz that parsed but is probably not what the author meant.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Source line of the affected question, if any.
    pub line: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a parsed quiz for authoring mistakes the parser accepts.
pub fn validate_quiz(parsed: &ParsedQuiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let questions = &parsed.quiz.questions;

    if let Some(n) = parsed.config.n_questions {
        if n > questions.len() {
            warnings.push(ValidationWarning {
                line: None,
                message: format!(
                    "nQuestions is {n} but the quiz only has {} question(s)",
                    questions.len()
                ),
            });
        }
    }

    let mut seen_prompts = std::collections::HashSet::new();
    for q in questions {
        if !seen_prompts.insert(q.prompt.as_str()) {
            warnings.push(ValidationWarning {
                line: Some(q.line),
                message: format!("duplicate question prompt: {}", q.prompt),
            });
        }
    }

    for q in questions {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                line: Some(q.line),
                message: "question prompt is empty".into(),
            });
        }

        let mut seen_choices = std::collections::HashSet::new();
        for c in &q.choices {
            if c.text.is_empty() {
                warnings.push(ValidationWarning {
                    line: Some(q.line),
                    message: "choice text is empty".into(),
                });
            } else if !seen_choices.insert(c.text.as_str()) {
                warnings.push(ValidationWarning {
                    line: Some(q.line),
                    message: format!("duplicate choice: {}", c.text),
                });
            }
        }
    }

    warnings
}
