//! Core data model types for quizmark.
//!
//! A [`Quiz`] is built once by the parser and never mutated afterwards.
//! Sessions hold it behind an `Arc` and keep their own presentation state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display and ordering options for a quiz.
///
/// Built from the host defaults and then overridden field by field by the
/// quiz's own front matter. Immutable once a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Primary CSS color.
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    /// Secondary CSS color.
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    /// Text color of some elements.
    #[serde(default = "default_text_color")]
    pub text_color: String,
    /// Shuffle the question order for each session.
    #[serde(default)]
    pub shuffle_questions: bool,
    /// Shuffle the answers of each question.
    #[serde(default = "default_true")]
    pub shuffle_answers: bool,
    /// Only ask this many questions (applied after shuffling).
    #[serde(default)]
    pub n_questions: Option<usize>,
    /// Language of the user interface.
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            text_color: default_text_color(),
            shuffle_questions: false,
            shuffle_answers: true,
            n_questions: None,
            locale: default_locale(),
        }
    }
}

impl QuizConfig {
    /// How many questions a session asks. A zero limit counts as no limit.
    pub fn question_limit(&self) -> Option<usize> {
        self.n_questions.filter(|&n| n > 0)
    }
}

fn default_primary_color() -> String {
    "steelblue".to_string()
}

fn default_secondary_color() -> String {
    "#EFEFF0".to_string()
}

fn default_text_color() -> String {
    "#0C0A3E".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

/// How a question is answered and scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Ordered checkbox list, exactly one correct choice.
    SingleChoice,
    /// Unordered checkbox list, one or more correct choices.
    MultiChoice,
    /// Plain ordered list; the authored order is the answer.
    Ordering,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::SingleChoice => write!(f, "single-choice"),
            QuestionKind::MultiChoice => write!(f, "multi-choice"),
            QuestionKind::Ordering => write!(f, "ordering"),
        }
    }
}

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Choice text as authored.
    pub text: String,
    /// Whether the author marked this choice `[x]`.
    ///
    /// Always `false` for ordering questions, whose answer is the authored order.
    pub is_correct: bool,
    /// Explanation shown for this choice during review.
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Content between a question heading and its answer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// Plain (inline-Markdown) text.
    Paragraph { text: String },
    /// A fenced code sample, shown verbatim and never executed.
    Code {
        #[serde(default)]
        lang: Option<String>,
        source: String,
    },
}

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Heading text.
    pub prompt: String,
    /// Paragraphs and code samples following the heading.
    #[serde(default)]
    pub body: Vec<Block>,
    /// Block-quoted hint.
    #[serde(default)]
    pub hint: Option<String>,
    /// First image referenced by the question.
    #[serde(default)]
    pub media: Option<String>,
    /// How the question is answered.
    pub kind: QuestionKind,
    /// Choices in authored order.
    pub choices: Vec<Choice>,
    /// 1-based source line of the heading.
    #[serde(default)]
    pub line: usize,
}

impl Question {
    /// Indices (authored order) of the choices marked correct.
    pub fn correct_indices(&self) -> Vec<usize> {
        self.choices
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_correct)
            .map(|(i, _)| i)
            .collect()
    }
}

/// An ordered, immutable collection of questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// The first question's prompt, used as a display title.
    pub fn title(&self) -> &str {
        self.questions
            .first()
            .map(|q| q.prompt.as_str())
            .unwrap_or("Quiz")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_kind_display() {
        assert_eq!(QuestionKind::SingleChoice.to_string(), "single-choice");
        assert_eq!(QuestionKind::MultiChoice.to_string(), "multi-choice");
        assert_eq!(QuestionKind::Ordering.to_string(), "ordering");
    }

    #[test]
    fn config_default() {
        let config = QuizConfig::default();
        assert_eq!(config.primary_color, "steelblue");
        assert_eq!(config.secondary_color, "#EFEFF0");
        assert!(config.shuffle_answers);
        assert!(!config.shuffle_questions);
        assert!(config.n_questions.is_none());
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn zero_question_limit_means_all() {
        let mut config = QuizConfig {
            n_questions: Some(0),
            ..QuizConfig::default()
        };
        assert_eq!(config.question_limit(), None);
        config.n_questions = Some(2);
        assert_eq!(config.question_limit(), Some(2));
    }

    #[test]
    fn config_missing_fields_take_defaults() {
        let config: QuizConfig = serde_json::from_str(r#"{"shuffle_answers": false}"#).unwrap();
        assert!(!config.shuffle_answers);
        assert_eq!(config.text_color, "#0C0A3E");
    }

    #[test]
    fn correct_indices_follow_authored_order() {
        let question = Question {
            prompt: "Pick".into(),
            body: vec![],
            hint: None,
            media: None,
            kind: QuestionKind::MultiChoice,
            choices: vec![
                Choice {
                    text: "a".into(),
                    is_correct: true,
                    explanation: None,
                },
                Choice {
                    text: "b".into(),
                    is_correct: false,
                    explanation: None,
                },
                Choice {
                    text: "c".into(),
                    is_correct: true,
                    explanation: None,
                },
            ],
            line: 1,
        };
        assert_eq!(question.correct_indices(), vec![0, 2]);
    }
}
