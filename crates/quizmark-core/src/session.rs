//! Session runner: one attempt at a quiz by a single user.
//!
//! ```text
//! NotStarted --start--> InProgress --last answer--> Reviewing --finish--> Finished
//!                           ^                           |                    |
//!                           +---------- restart --------+--------------------+
//! ```
//!
//! Every action either succeeds or returns a [`SessionError`] with the
//! session left exactly as it was.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{InvalidAnswer, ParseError, SessionError};
use crate::model::{Question, QuestionKind, Quiz, QuizConfig};
use crate::parser::{parse_quiz, ParsedQuiz};
use crate::scoring::{is_correct, normalize_answer};

pub use crate::scoring::Answer;

/// Lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    NotStarted,
    InProgress,
    Reviewing,
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not started"),
            SessionState::InProgress => write!(f, "in progress"),
            SessionState::Reviewing => write!(f, "reviewing"),
            SessionState::Finished => write!(f, "finished"),
        }
    }
}

/// The current question as the user sees it.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView<'a> {
    /// 0-based position within the session.
    pub position: usize,
    /// Number of questions in the session.
    pub total: usize,
    pub question: &'a Question,
    /// Choice texts in presentation order. Answer indices refer to this list.
    pub choices: Vec<&'a str>,
}

/// Review data for one choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceReview {
    pub text: String,
    pub is_correct: bool,
    /// Whether the user picked this choice. For ordering questions: whether
    /// the item ended up in its authored position.
    pub selected: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Outcome of one answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    /// 0-based position within the session.
    pub position: usize,
    /// Index of the question in the quiz.
    pub question_index: usize,
    pub prompt: String,
    pub kind: QuestionKind,
    /// The answer in authored indices.
    pub submitted: Answer,
    /// Texts of the submitted choices, in submitted order.
    pub submitted_text: Vec<String>,
    pub correct: bool,
    /// Choices in authored order.
    pub choices: Vec<ChoiceReview>,
}

/// One attempt at a quiz.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    quiz: Arc<Quiz>,
    config: QuizConfig,
    state: SessionState,
    /// Question indices in the order they are asked.
    order: Vec<usize>,
    /// Per question index: authored choice index shown at each position.
    presentation: Vec<Vec<usize>>,
    current_index: usize,
    /// Finalized answers keyed by question index, in authored indices.
    answers: BTreeMap<usize, Answer>,
    score: u32,
}

/// Parse `markup` with default settings and create a session for it.
pub fn create_session(markup: &str) -> Result<Session, ParseError> {
    Session::from_parsed(parse_quiz(markup))
}

impl Session {
    /// Create a session that has not started yet.
    pub fn new(quiz: Arc<Quiz>, config: QuizConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            quiz,
            config,
            state: SessionState::NotStarted,
            order: Vec::new(),
            presentation: Vec::new(),
            current_index: 0,
            answers: BTreeMap::new(),
            score: 0,
        }
    }

    /// Create a session from parser output, logging its diagnostics.
    pub fn from_parsed(parsed: ParsedQuiz) -> Result<Self, ParseError> {
        for d in &parsed.diagnostics {
            tracing::warn!("{d}");
        }
        if parsed.quiz.is_empty() {
            return Err(ParseError::NoQuestions {
                diagnostics: parsed.diagnostics,
            });
        }
        Ok(Self::new(Arc::new(parsed.quiz), parsed.config))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn quiz(&self) -> &Arc<Quiz> {
        &self.quiz
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Question indices in the order they are asked. Empty before start.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn answers(&self) -> &BTreeMap<usize, Answer> {
        &self.answers
    }

    /// Number of questions asked in this session.
    pub fn total(&self) -> usize {
        self.order.len()
    }

    /// Number of correctly answered questions.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Start the session with a thread-local random source.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.start_with_rng(&mut rand::thread_rng())
    }

    /// Start the session, drawing every shuffle from `rng`.
    pub fn start_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        if self.state != SessionState::NotStarted {
            return Err(SessionError::InvalidTransition {
                action: "start",
                state: self.state,
            });
        }
        self.begin(rng);
        Ok(())
    }

    /// Start a fresh attempt after reviewing or finishing.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.restart_with_rng(&mut rand::thread_rng())
    }

    pub fn restart_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        if !matches!(
            self.state,
            SessionState::Reviewing | SessionState::Finished
        ) {
            return Err(SessionError::InvalidTransition {
                action: "restart",
                state: self.state,
            });
        }
        self.begin(rng);
        Ok(())
    }

    /// Leave the review. The session is terminal afterwards.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Reviewing {
            return Err(SessionError::InvalidTransition {
                action: "finish",
                state: self.state,
            });
        }
        self.state = SessionState::Finished;
        tracing::info!(session = %self.id, score = self.score, "session finished");
        Ok(())
    }

    fn begin<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.quiz.len()).collect();
        if self.config.shuffle_questions {
            order.shuffle(rng);
        }
        // Shuffle first, then take the subset.
        if let Some(n) = self.config.question_limit() {
            order.truncate(n);
        }

        self.presentation = self
            .quiz
            .questions
            .iter()
            .map(|q| present(q, self.config.shuffle_answers, rng))
            .collect();
        self.order = order;
        self.current_index = 0;
        self.answers.clear();
        self.score = 0;
        self.state = SessionState::InProgress;

        tracing::info!(
            session = %self.id,
            questions = self.order.len(),
            "session started"
        );
    }

    /// The question to answer next, or `None` when not in progress.
    pub fn current_question(&self) -> Option<QuestionView<'_>> {
        if self.state != SessionState::InProgress {
            return None;
        }
        let index = *self.order.get(self.current_index)?;
        let question = self.quiz.get(index)?;
        let choices = self.presentation[index]
            .iter()
            .map(|&i| question.choices[i].text.as_str())
            .collect();
        Some(QuestionView {
            position: self.current_index,
            total: self.order.len(),
            question,
            choices,
        })
    }

    /// Hint for the question at `position`.
    ///
    /// Only the current question's hint is available; asking for any other
    /// position yields `None`.
    pub fn hint(&self, position: usize) -> Option<&str> {
        if self.state != SessionState::InProgress || position != self.current_index {
            return None;
        }
        let index = *self.order.get(position)?;
        self.quiz.get(index)?.hint.as_deref()
    }

    /// Submit the answer for the question at `position`.
    ///
    /// Returns whether the answer was correct. A rejected answer leaves the
    /// session unchanged.
    pub fn submit_answer(&mut self, position: usize, answer: Answer) -> Result<bool, SessionError> {
        if self.state != SessionState::InProgress {
            return Err(InvalidAnswer::NotInProgress { state: self.state }.into());
        }
        if position != self.current_index {
            return Err(InvalidAnswer::OutOfTurn {
                expected: self.current_index,
                got: position,
            }
            .into());
        }

        let Some((index, question)) = self
            .order
            .get(position)
            .and_then(|&i| Some((i, self.quiz.get(i)?)))
        else {
            return Err(InvalidAnswer::OutOfTurn {
                expected: self.current_index,
                got: position,
            }
            .into());
        };
        let authored = normalize_answer(question, &self.presentation[index], &answer)?;
        let correct = is_correct(question, &authored);

        self.answers.insert(index, authored);
        if correct {
            self.score += 1;
        }
        tracing::debug!(session = %self.id, position, correct, "answer recorded");

        if position + 1 == self.order.len() {
            self.state = SessionState::Reviewing;
            tracing::info!(
                session = %self.id,
                score = self.score,
                total = self.order.len(),
                "all questions answered"
            );
        } else {
            self.current_index += 1;
        }
        Ok(correct)
    }

    /// Results for every answered question, in the order they were asked.
    pub fn results(&self) -> Vec<QuestionResult> {
        self.order
            .iter()
            .enumerate()
            .filter_map(|(position, &index)| {
                let submitted = self.answers.get(&index)?;
                let question = &self.quiz.questions[index];
                Some(review(position, index, question, submitted))
            })
            .collect()
    }
}

/// Presentation order of a question's choices.
///
/// Ordering questions are always shuffled and never shown in authored order.
fn present<R: Rng + ?Sized>(question: &Question, shuffle_answers: bool, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..question.choices.len()).collect();
    match question.kind {
        QuestionKind::Ordering => {
            order.shuffle(rng);
            if order.len() > 1 && order.iter().copied().eq(0..order.len()) {
                order.rotate_left(1);
            }
        }
        _ if shuffle_answers => order.shuffle(rng),
        _ => {}
    }
    order
}

fn review(position: usize, index: usize, question: &Question, submitted: &Answer) -> QuestionResult {
    let picked = submitted.indices();
    let choices = question
        .choices
        .iter()
        .enumerate()
        .map(|(i, c)| ChoiceReview {
            text: c.text.clone(),
            is_correct: c.is_correct,
            selected: match submitted {
                Answer::Ordering(order) => order.get(i) == Some(&i),
                _ => picked.contains(&i),
            },
            explanation: c.explanation.clone(),
        })
        .collect();

    QuestionResult {
        position,
        question_index: index,
        prompt: question.prompt.clone(),
        kind: question.kind,
        submitted: submitted.clone(),
        submitted_text: picked
            .iter()
            .filter_map(|&i| question.choices.get(i).map(|c| c.text.clone()))
            .collect(),
        correct: is_correct(question, submitted),
        choices,
    }
}
