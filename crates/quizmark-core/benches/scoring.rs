use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizmark_core::model::{Choice, Question, QuestionKind, Quiz, QuizConfig};
use quizmark_core::scoring::{is_correct, normalize_answer, Answer};
use quizmark_core::session::Session;

fn make_question(kind: QuestionKind, n: usize) -> Question {
    Question {
        prompt: "bench".into(),
        body: vec![],
        hint: None,
        media: None,
        kind,
        choices: (0..n)
            .map(|i| Choice {
                text: format!("choice {i}"),
                is_correct: kind != QuestionKind::Ordering && i % 2 == 0,
                explanation: None,
            })
            .collect(),
        line: 1,
    }
}

fn bench_answer_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("answer_scoring");

    let multi = make_question(QuestionKind::MultiChoice, 20);
    let ordering = make_question(QuestionKind::Ordering, 20);
    let presentation: Vec<usize> = (0..20).rev().collect();
    let multi_answer = Answer::Multiple((0..20).step_by(2).collect());
    let ordering_answer = Answer::Ordering((0..20).rev().collect());

    group.bench_function("multi_choice_20", |b| {
        b.iter(|| {
            let a = normalize_answer(&multi, &presentation, black_box(&multi_answer)).unwrap();
            is_correct(&multi, &a)
        })
    });

    group.bench_function("ordering_20", |b| {
        b.iter(|| {
            let a =
                normalize_answer(&ordering, &presentation, black_box(&ordering_answer)).unwrap();
            is_correct(&ordering, &a)
        })
    });

    group.finish();
}

fn bench_full_session(c: &mut Criterion) {
    let quiz = Arc::new(Quiz {
        questions: (0..100)
            .map(|_| make_question(QuestionKind::SingleChoice, 1))
            .map(|mut q| {
                q.choices[0].is_correct = true;
                q
            })
            .collect(),
    });
    let config = QuizConfig {
        shuffle_questions: true,
        ..QuizConfig::default()
    };

    c.bench_function("session_100_questions", |b| {
        b.iter(|| {
            let mut session = Session::new(Arc::clone(&quiz), config.clone());
            session
                .start_with_rng(&mut StdRng::seed_from_u64(42))
                .unwrap();
            for position in 0..session.total() {
                session.submit_answer(position, Answer::Single(0)).unwrap();
            }
            black_box(session.score())
        })
    });
}

criterion_group!(benches, bench_answer_scoring, bench_full_session);
criterion_main!(benches);
