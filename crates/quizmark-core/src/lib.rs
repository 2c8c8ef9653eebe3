//! quizmark-core: Quiz markup parser, session runner, and scoring.
//!
//! This crate defines the quiz data model, the markup parser that builds it,
//! and the session state machine that drives one attempt at a quiz.

pub mod error;
mod frontmatter;
mod lexer;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod session;
pub mod traits;

pub use error::{Diagnostic, DiagnosticKind, InvalidAnswer, ParseError, SessionError};
pub use model::{Block, Choice, Question, QuestionKind, Quiz, QuizConfig};
pub use parser::{parse_quiz, parse_quiz_with, ParsedQuiz};
pub use scoring::Answer;
pub use session::{
    create_session, ChoiceReview, QuestionResult, QuestionView, Session, SessionState,
};
