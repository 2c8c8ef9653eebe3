//! The `quizmark init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizmark.toml
    if std::path::Path::new("quizmark.toml").exists() {
        println!("quizmark.toml already exists, skipping.");
    } else {
        std::fs::write("quizmark.toml", SAMPLE_CONFIG)?;
        println!("Created quizmark.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.md");
    if example_path.exists() {
        println!("quizzes/example.md already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.md");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizzes/example.md or add your own quizzes");
    println!("  2. Run: quizmark validate --quiz quizzes");
    println!("  3. Run: quizmark play --quiz quizzes/example.md");

    Ok(())
}

const SAMPLE_CONFIG: &str = r##"# quizmark configuration

# Container the quiz is rendered into.
container = "quizdown"

# Give up on loading assets after this many seconds.
load_timeout_secs = 10

# Defaults for every quiz. Front matter in a quiz overrides these.
[defaults]
primary_color = "steelblue"
secondary_color = "#EFEFF0"
text_color = "#0C0A3E"
shuffle_questions = false
shuffle_answers = true
locale = "en"

# Assets to load before a quiz starts. `${VAR}` is expanded from the environment.
# [[assets]]
# name = "highlight"
# url = "${QUIZMARK_CDN}/highlight.min.js"
"##;

const EXAMPLE_QUIZ: &str = r#"---
shuffleAnswers: true
---

# Which keyword declares an immutable binding in Rust?

> It is the shortest one.

1. [x] `let`
   > Bindings are immutable unless marked `mut`.
1. [ ] `var`
1. [ ] `const mut`

# Which of these types are `Copy`?

- [x] `u32`
- [x] `bool`
- [ ] `String`
  > `String` owns a heap buffer, so it is only `Clone`.
- [ ] `Vec<u8>`

# Put the stages of a build in order

1. Parse
2. Type check
3. Generate code
4. Link
"#;
