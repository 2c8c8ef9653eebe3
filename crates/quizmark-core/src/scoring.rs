//! Answer validation and all-or-nothing scoring.
//!
//! Answers arrive in presentation indices (what the user saw) and are stored
//! in authored indices, so scoring never depends on how choices were shuffled.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::InvalidAnswer;
use crate::model::{Question, QuestionKind};

/// A submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "choices", rename_all = "kebab-case")]
pub enum Answer {
    /// One choice, for single-choice questions.
    Single(usize),
    /// A set of choices, for multi-choice questions.
    Multiple(Vec<usize>),
    /// Every item, in the order the user arranged them.
    Ordering(Vec<usize>),
}

impl Answer {
    /// Short name of the answer shape, for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Answer::Single(_) => "single",
            Answer::Multiple(_) => "multiple",
            Answer::Ordering(_) => "ordering",
        }
    }

    /// The indices this answer refers to.
    pub fn indices(&self) -> &[usize] {
        match self {
            Answer::Single(i) => std::slice::from_ref(i),
            Answer::Multiple(v) | Answer::Ordering(v) => v,
        }
    }
}

/// Check an answer against the question and map it to authored indices.
///
/// `presentation[p]` is the authored index of the choice shown at position `p`.
pub fn normalize_answer(
    question: &Question,
    presentation: &[usize],
    answer: &Answer,
) -> Result<Answer, InvalidAnswer> {
    let fits = matches!(
        (question.kind, answer),
        (QuestionKind::SingleChoice, Answer::Single(_))
            | (QuestionKind::MultiChoice, Answer::Multiple(_))
            | (QuestionKind::Ordering, Answer::Ordering(_))
    );
    if !fits {
        return Err(InvalidAnswer::ShapeMismatch {
            kind: question.kind,
            answer: answer.shape(),
        });
    }

    let len = presentation.len();
    let mut seen = HashSet::new();
    let mut authored = Vec::with_capacity(answer.indices().len());
    for &index in answer.indices() {
        let Some(&original) = presentation.get(index) else {
            return Err(InvalidAnswer::IndexOutOfRange { index, len });
        };
        if !seen.insert(index) {
            return Err(InvalidAnswer::DuplicateIndex(index));
        }
        authored.push(original);
    }

    match answer {
        Answer::Single(_) => Ok(Answer::Single(authored[0])),
        Answer::Multiple(_) if authored.is_empty() => Err(InvalidAnswer::EmptySelection),
        Answer::Multiple(_) => {
            authored.sort_unstable();
            Ok(Answer::Multiple(authored))
        }
        Answer::Ordering(_) if authored.len() != len => Err(InvalidAnswer::IncompletePermutation {
            expected: len,
            got: authored.len(),
        }),
        Answer::Ordering(_) => Ok(Answer::Ordering(authored)),
    }
}

/// Score an answer given in authored indices. No partial credit.
pub fn is_correct(question: &Question, answer: &Answer) -> bool {
    match (question.kind, answer) {
        (QuestionKind::SingleChoice, Answer::Single(i)) => {
            question.choices.get(*i).is_some_and(|c| c.is_correct)
        }
        (QuestionKind::MultiChoice, Answer::Multiple(selected)) => {
            let mut selected = selected.clone();
            selected.sort_unstable();
            selected == question.correct_indices()
        }
        (QuestionKind::Ordering, Answer::Ordering(order)) => {
            order.len() == question.choices.len() && order.iter().copied().eq(0..order.len())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Choice;

    fn question(kind: QuestionKind, correct: &[bool]) -> Question {
        Question {
            prompt: "Q".into(),
            body: vec![],
            hint: None,
            media: None,
            kind,
            choices: correct
                .iter()
                .enumerate()
                .map(|(i, &is_correct)| Choice {
                    text: format!("c{i}"),
                    is_correct,
                    explanation: None,
                })
                .collect(),
            line: 1,
        }
    }

    #[test]
    fn single_choice_maps_through_presentation() {
        let q = question(QuestionKind::SingleChoice, &[false, true, false]);
        // Shown as c2, c1, c0.
        let presentation = [2, 1, 0];
        let answer = normalize_answer(&q, &presentation, &Answer::Single(1)).unwrap();
        assert_eq!(answer, Answer::Single(1));
        assert!(is_correct(&q, &answer));

        let wrong = normalize_answer(&q, &presentation, &Answer::Single(0)).unwrap();
        assert_eq!(wrong, Answer::Single(2));
        assert!(!is_correct(&q, &wrong));
    }

    #[test]
    fn multi_choice_needs_exact_set() {
        let q = question(QuestionKind::MultiChoice, &[true, false, true]);
        let identity = [0, 1, 2];
        let exact = normalize_answer(&q, &identity, &Answer::Multiple(vec![2, 0])).unwrap();
        assert_eq!(exact, Answer::Multiple(vec![0, 2]));
        assert!(is_correct(&q, &exact));

        let partial = normalize_answer(&q, &identity, &Answer::Multiple(vec![0])).unwrap();
        assert!(!is_correct(&q, &partial));

        let extra = normalize_answer(&q, &identity, &Answer::Multiple(vec![0, 1, 2])).unwrap();
        assert!(!is_correct(&q, &extra));
    }

    #[test]
    fn ordering_needs_authored_order() {
        let q = question(QuestionKind::Ordering, &[false, false, false]);
        let presentation = [1, 0, 2];
        // Picking shown items 1, 0, 2 yields authored 0, 1, 2.
        let right = normalize_answer(&q, &presentation, &Answer::Ordering(vec![1, 0, 2])).unwrap();
        assert!(is_correct(&q, &right));

        let wrong = normalize_answer(&q, &presentation, &Answer::Ordering(vec![0, 1, 2])).unwrap();
        assert_eq!(wrong, Answer::Ordering(vec![1, 0, 2]));
        assert!(!is_correct(&q, &wrong));
    }

    #[test]
    fn rejects_malformed_answers() {
        let single = question(QuestionKind::SingleChoice, &[true, false]);
        let multi = question(QuestionKind::MultiChoice, &[true, false]);
        let ordering = question(QuestionKind::Ordering, &[false, false, false]);
        let two = [0, 1];
        let three = [0, 1, 2];

        assert!(matches!(
            normalize_answer(&single, &two, &Answer::Multiple(vec![0, 1])),
            Err(InvalidAnswer::ShapeMismatch { .. })
        ));
        assert_eq!(
            normalize_answer(&single, &two, &Answer::Single(5)),
            Err(InvalidAnswer::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(
            normalize_answer(&multi, &two, &Answer::Multiple(vec![])),
            Err(InvalidAnswer::EmptySelection)
        );
        assert_eq!(
            normalize_answer(&multi, &two, &Answer::Multiple(vec![1, 1])),
            Err(InvalidAnswer::DuplicateIndex(1))
        );
        assert_eq!(
            normalize_answer(&ordering, &three, &Answer::Ordering(vec![2, 0])),
            Err(InvalidAnswer::IncompletePermutation {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn mismatched_shapes_never_score() {
        let q = question(QuestionKind::SingleChoice, &[true]);
        assert!(!is_correct(&q, &Answer::Multiple(vec![0])));
    }
}
