//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizmark() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizmark").unwrap()
}

const GERMANY: &str = r#"---
shuffleAnswers: false
---

# Capital of Germany?

> It is not the largest port.

1. [ ] Frankfurt
1. [x] Berlin
1. [ ] Hamburg
"#;

fn write_quiz(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn validate_sample_quiz() {
    quizmark()
        .arg("validate")
        .arg("--quiz")
        .arg("../../quizzes/python-basics.md")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions"))
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn validate_directory() {
    quizmark()
        .arg("validate")
        .arg("--quiz")
        .arg("../../quizzes")
        .assert()
        .success()
        .stdout(predicate::str::contains("python-basics.md: 3 questions"))
        .stdout(predicate::str::contains("rust-ownership.md: 4 questions"));
}

#[test]
fn validate_reports_dropped_questions() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(
        &dir,
        "broken.md",
        "---\nshuffleAnswers: maybe\n---\n# Fine\n1. [x] a\n1. [ ] b\n\n# Nothing right\n1. [ ] a\n1. [ ] b\n",
    );

    quizmark()
        .arg("validate")
        .arg("--quiz")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 questions"))
        .stdout(predicate::str::contains("shuffleAnswers"))
        .stdout(predicate::str::contains("no correct choice"))
        .stdout(predicate::str::contains("2 issue(s) found"));
}

#[test]
fn validate_quiz_without_questions_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(&dir, "empty.md", "just some notes\n");

    quizmark()
        .arg("validate")
        .arg("--quiz")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no usable questions"));
}

#[test]
fn validate_nonexistent_file() {
    quizmark()
        .arg("validate")
        .arg("--quiz")
        .arg("nonexistent.md")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn play_correct_answer() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(&dir, "germany.md", GERMANY);

    quizmark()
        .arg("play")
        .arg("--quiz")
        .arg(&path)
        .arg("--seed")
        .arg("7")
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/1: Capital of Germany?"))
        .stdout(predicate::str::contains("  2. Berlin"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Score: 1/1"))
        .stdout(predicate::str::contains("Finished with 1/1."));
}

#[test]
fn play_rejects_bad_input_then_accepts() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(&dir, "germany.md", GERMANY);

    quizmark()
        .arg("play")
        .arg("--quiz")
        .arg(&path)
        .write_stdin("5\n1,2\nh\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("choose numbers between 1 and 3"))
        .stdout(predicate::str::contains("Invalid answer"))
        .stdout(predicate::str::contains("Hint: It is not the largest port."))
        .stdout(predicate::str::contains("Not quite."))
        .stdout(predicate::str::contains("Score: 0/1"));
}

#[test]
fn play_writes_results_json() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(&dir, "germany.md", GERMANY);
    let output = dir.path().join("results").join("run.json");

    quizmark()
        .arg("play")
        .arg("--quiz")
        .arg(&path)
        .arg("--output")
        .arg(&output)
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Results saved to"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["score"], 1);
    assert_eq!(json["total"], 1);
    assert_eq!(json["title"], "Capital of Germany?");
    assert_eq!(json["results"][0]["submitted_text"][0], "Berlin");
}

#[test]
fn play_writes_results_page() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(&dir, "germany.md", GERMANY);
    let page = dir.path().join("results.html");

    quizmark()
        .arg("play")
        .arg("--quiz")
        .arg(&path)
        .arg("--html")
        .arg(&page)
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Results page written to"));

    let html = std::fs::read_to_string(&page).unwrap();
    assert!(html.contains("<strong>0</strong> of <strong>1</strong> correct"));
    assert!(html.contains("class=\"result incorrect\""));
}

#[test]
fn play_whole_sample_quiz() {
    // Any permutation is a valid ordering answer, so the run always finishes.
    quizmark()
        .arg("play")
        .arg("--quiz")
        .arg("../../quizzes/python-basics.md")
        .arg("--seed")
        .arg("1")
        .write_stdin("1\n1,2\n1,2,3,4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 3/3"))
        .stdout(predicate::str::contains("Review:"))
        .stdout(predicate::str::contains("Score:"));
}

#[test]
fn play_input_ends_early() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(&dir, "germany.md", GERMANY);

    quizmark()
        .arg("play")
        .arg("--quiz")
        .arg(&path)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input ended"));
}

#[test]
fn play_with_missing_asset_fails_gracefully() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(&dir, "germany.md", GERMANY);
    let config = write_quiz(
        &dir,
        "quizmark.toml",
        "[[assets]]\nname = \"highlight\"\nurl = \"/definitely/not/here/highlight.js\"\n",
    );

    quizmark()
        .arg("play")
        .arg("--quiz")
        .arg(&path)
        .arg("--config")
        .arg(&config)
        .write_stdin("2\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "There's something wrong with quiz loading, please contact your instructor.",
        ))
        .stderr(predicate::str::contains("dependencies unavailable"))
        .stdout(predicate::str::contains("Correct!").not());
}

#[test]
fn render_writes_html() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("preview.html");

    quizmark()
        .arg("render")
        .arg("--quiz")
        .arg("../../quizzes/python-basics.md")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 3 questions"));

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("Python Lists"));
    assert!(html.contains("language-python"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizmark.toml"))
        .stdout(predicate::str::contains("Created quizzes/example.md"));

    assert!(dir.path().join("quizmark.toml").exists());
    assert!(dir.path().join("quizzes/example.md").exists());

    // The generated files are usable as they are.
    quizmark()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--quiz")
        .arg("quizzes/example.md")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions"))
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    quizmark()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Markdown quizzes"));
}

#[test]
fn version_output() {
    quizmark()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizmark"));
}
