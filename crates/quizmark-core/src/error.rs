//! Parse diagnostics and session error types.
//!
//! Parsing recovers from almost everything: problems become [`Diagnostic`]s
//! and the affected field or question block falls back or is dropped. Only a
//! quiz with no usable question at all is a hard [`ParseError`].

use thiserror::Error;

use crate::model::QuestionKind;
use crate::session::SessionState;

/// A recoverable problem found while parsing quiz markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct Diagnostic {
    /// 1-based source line the problem was found on.
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind) -> Self {
        Self { line, kind }
    }
}

/// What went wrong, and how the parser recovered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// A front matter value could not be interpreted; the default is kept.
    #[error("invalid value {value:?} for front matter key `{key}`, using default")]
    MalformedFrontMatter { key: String, value: String },

    #[error("unknown front matter key `{0}` ignored")]
    UnknownFrontMatterKey(String),

    /// A front matter line without a `key: value` shape.
    #[error("front matter line {0:?} is not `key: value`, ignored")]
    FrontMatterSyntax(String),

    /// The opening `---` was never closed; the whole block is ignored.
    #[error("front matter is never closed, using defaults")]
    UnterminatedFrontMatter,

    /// A code fence had no closing marker; it was closed at the next heading.
    #[error("code fence is never closed, closing it at the next heading")]
    UnterminatedCodeFence,

    #[error("text before the first question heading is ignored")]
    StrayContent,

    #[error("question {prompt:?} has no answer items, dropped")]
    NoAnswers { prompt: String },

    #[error("question {prompt:?} has no correct choice, dropped")]
    NoCorrectChoice { prompt: String },

    #[error("single-choice question {prompt:?} has {count} correct choices, dropped")]
    MultipleCorrectChoices { prompt: String, count: usize },

    #[error("question {prompt:?} mixes checkbox and plain list items, dropped")]
    MixedListStyles { prompt: String },

    #[error("ordering question {prompt:?} needs at least two items, dropped")]
    TooFewOrderingItems { prompt: String },
}

impl DiagnosticKind {
    /// Returns `true` if this diagnostic caused a question block to be dropped.
    pub fn drops_question(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::NoAnswers { .. }
                | DiagnosticKind::NoCorrectChoice { .. }
                | DiagnosticKind::MultipleCorrectChoices { .. }
                | DiagnosticKind::MixedListStyles { .. }
                | DiagnosticKind::TooFewOrderingItems { .. }
        )
    }
}

/// Unrecoverable parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Every question block was missing or dropped.
    #[error("quiz has no usable questions ({} diagnostic(s))", diagnostics.len())]
    NoQuestions { diagnostics: Vec<Diagnostic> },
}

/// An answer that was rejected without changing the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidAnswer {
    #[error("answers are only accepted while in progress (session is {state})")]
    NotInProgress { state: SessionState },

    #[error("answer is for question {got}, but the current question is {expected}")]
    OutOfTurn { expected: usize, got: usize },

    #[error("{answer} answer does not fit a {kind} question")]
    ShapeMismatch {
        kind: QuestionKind,
        answer: &'static str,
    },

    #[error("choice {index} does not exist (question has {len} choices)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("choice {0} was given more than once")]
    DuplicateIndex(usize),

    #[error("no choice was selected")]
    EmptySelection,

    #[error("ordering must place all {expected} items, got {got}")]
    IncompletePermutation { expected: usize, got: usize },
}

/// Errors returned by session actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The action is not allowed in the current state.
    #[error("cannot {action} while session is {state}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    #[error("invalid answer submission: {0}")]
    InvalidAnswer(#[from] InvalidAnswer),
}
