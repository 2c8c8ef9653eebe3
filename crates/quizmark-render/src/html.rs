//! HTML generation.
//!
//! Fragments are built with plain string pushes and every piece of authored
//! text goes through [`html_escape`]. Pages are self-contained with CSS
//! inlined; theme colors become CSS variables.

use anyhow::{Context, Result};
use std::path::Path;

use quizmark_core::model::{Block, Question, QuestionKind, Quiz, QuizConfig};
use quizmark_core::report::ResultsReport;
use quizmark_core::session::{QuestionResult, QuestionView};

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Keep only characters that can appear in a CSS color value.
fn css_value(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || "#(),.% -".contains(*c))
        .collect()
}

/// `:root` rule carrying the quiz theme.
pub(crate) fn theme_css(config: &QuizConfig) -> String {
    format!(
        ":root {{ --primary: {}; --secondary: {}; --text: {}; }}\n",
        css_value(&config.primary_color),
        css_value(&config.secondary_color),
        css_value(&config.text_color),
    )
}

/// Wrap a body fragment into a complete document.
pub(crate) fn page(title: &str, config: &QuizConfig, body: &str) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!(
        "<html lang=\"{}\">\n<head>\n",
        html_escape(&config.locale)
    ));
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(&theme_css(config));
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("</body>\n</html>");
    html
}

fn render_blocks(blocks: &[Block]) -> String {
    let mut html = String::new();
    for block in blocks {
        match block {
            Block::Paragraph { text } => {
                html.push_str(&format!("<p>{}</p>\n", html_escape(text)));
            }
            Block::Code { lang, source } => {
                let class = lang
                    .as_deref()
                    .map(|l| format!(" class=\"language-{}\"", html_escape(l)))
                    .unwrap_or_default();
                html.push_str(&format!(
                    "<pre><code{}>{}</code></pre>\n",
                    class,
                    html_escape(source)
                ));
            }
        }
    }
    html
}

/// Prompt, body, media and hint of a question.
fn render_stem(question: &Question) -> String {
    let mut html = String::new();
    html.push_str(&format!("<h2>{}</h2>\n", html_escape(&question.prompt)));
    html.push_str(&render_blocks(&question.body));
    if let Some(src) = &question.media {
        html.push_str(&format!(
            "<img class=\"media\" src=\"{}\" alt=\"\">\n",
            html_escape(src)
        ));
    }
    if let Some(hint) = &question.hint {
        html.push_str(&format!(
            "<details class=\"hint\"><summary>Hint</summary><p>{}</p></details>\n",
            html_escape(hint)
        ));
    }
    html
}

/// The current question with answer inputs in presentation order.
pub(crate) fn render_question(view: &QuestionView<'_>) -> String {
    let q = view.question;
    let mut html = String::new();

    html.push_str(&format!(
        "<section class=\"question {}\" data-position=\"{}\">\n",
        q.kind, view.position
    ));
    html.push_str(&format!(
        "<p class=\"progress\">Question {} of {}</p>\n",
        view.position + 1,
        view.total
    ));
    html.push_str(&render_stem(q));

    let name = format!("q{}", view.position);
    match q.kind {
        QuestionKind::SingleChoice | QuestionKind::MultiChoice => {
            let input = if q.kind == QuestionKind::SingleChoice {
                "radio"
            } else {
                "checkbox"
            };
            html.push_str("<ul class=\"choices\">\n");
            for (i, text) in view.choices.iter().enumerate() {
                html.push_str(&format!(
                    "<li><label><input type=\"{input}\" name=\"{name}\" value=\"{i}\"> {}</label></li>\n",
                    html_escape(text)
                ));
            }
            html.push_str("</ul>\n");
        }
        QuestionKind::Ordering => {
            html.push_str("<ol class=\"choices sortable\">\n");
            for (i, text) in view.choices.iter().enumerate() {
                html.push_str(&format!(
                    "<li draggable=\"true\" data-index=\"{i}\">{}</li>\n",
                    html_escape(text)
                ));
            }
            html.push_str("</ol>\n");
        }
    }

    html.push_str("<button data-action=\"submit\">Check</button>\n");
    html.push_str("</section>\n");
    html
}

/// Review of one answered question, choices in authored order.
pub(crate) fn render_result(result: &QuestionResult) -> String {
    let verdict = if result.correct { "correct" } else { "incorrect" };
    let mut html = String::new();

    html.push_str(&format!(
        "<section class=\"result {verdict}\" data-position=\"{}\">\n",
        result.position
    ));
    html.push_str(&format!(
        "<h2>{}. {} <span class=\"badge {verdict}\">{verdict}</span></h2>\n",
        result.position + 1,
        html_escape(&result.prompt)
    ));
    html.push_str("<ul class=\"choices\">\n");
    for choice in &result.choices {
        let mut classes = Vec::new();
        if choice.is_correct {
            classes.push("correct");
        }
        if choice.selected {
            classes.push("selected");
        }
        html.push_str(&format!(
            "<li class=\"{}\">{}",
            classes.join(" "),
            html_escape(&choice.text)
        ));
        if let Some(explanation) = &choice.explanation {
            html.push_str(&format!(
                "<p class=\"explanation\">{}</p>",
                html_escape(explanation)
            ));
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n");

    if result.kind == QuestionKind::Ordering {
        html.push_str(&format!(
            "<p class=\"submitted\">Your order: {}</p>\n",
            html_escape(&result.submitted_text.join(" → "))
        ));
    }

    html.push_str("</section>\n");
    html
}

pub(crate) fn render_score(score: u32, total: usize) -> String {
    format!(
        "<p class=\"score\"><strong>{score}</strong> of <strong>{total}</strong> correct</p>\n"
    )
}

/// Generate a preview page listing every question with its answers marked.
///
/// Choices appear in authored order; nothing is shuffled.
pub fn generate_preview_html(quiz: &Quiz, config: &QuizConfig) -> String {
    let mut body = String::new();

    body.push_str("<header>\n");
    body.push_str(&format!("<h1>{}</h1>\n", html_escape(quiz.title())));
    body.push_str(&format!(
        "<p class=\"meta\">{} questions | shuffle questions: {} | shuffle answers: {}{}</p>\n",
        quiz.len(),
        config.shuffle_questions,
        config.shuffle_answers,
        config
            .question_limit()
            .map(|n| format!(" | asking {n}"))
            .unwrap_or_default()
    ));
    body.push_str("</header>\n");

    for (i, q) in quiz.questions.iter().enumerate() {
        body.push_str(&format!(
            "<section class=\"question {}\" data-line=\"{}\">\n",
            q.kind, q.line
        ));
        body.push_str(&format!(
            "<p class=\"progress\">{} · {}</p>\n",
            i + 1,
            q.kind
        ));
        body.push_str(&render_stem(q));

        let list = if q.kind == QuestionKind::Ordering {
            "ol"
        } else {
            "ul"
        };
        body.push_str(&format!("<{list} class=\"choices\">\n"));
        for choice in &q.choices {
            let class = if choice.is_correct { "correct" } else { "" };
            body.push_str(&format!(
                "<li class=\"{class}\">{}",
                html_escape(&choice.text)
            ));
            if let Some(explanation) = &choice.explanation {
                body.push_str(&format!(
                    "<p class=\"explanation\">{}</p>",
                    html_escape(explanation)
                ));
            }
            body.push_str("</li>\n");
        }
        body.push_str(&format!("</{list}>\n"));
        body.push_str("</section>\n");
    }

    page(quiz.title(), config, &body)
}

/// Generate a results page for a session report.
pub fn generate_results_html(report: &ResultsReport, config: &QuizConfig) -> String {
    let mut body = String::new();

    body.push_str("<header>\n");
    body.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.title)));
    body.push_str(&format!(
        "<p class=\"meta\">Session {} | {} | {:.0}%</p>\n",
        report.session_id,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.ratio() * 100.0
    ));
    body.push_str(&render_score(report.score, report.total));
    body.push_str("</header>\n");

    for result in &report.results {
        body.push_str(&render_result(result));
    }

    // Raw JSON
    body.push_str("<details class=\"raw-data\">\n<summary>Raw JSON Data</summary>\n");
    body.push_str("<pre><code>");
    body.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    body.push_str("</code></pre>\n</details>\n");

    page(&report.title, config, &body)
}

/// Write an HTML document to a file.
pub fn write_html(html: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML to {}", path.display()))?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}

const CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; color: var(--text); }
h1, h2 { color: var(--primary); }
.meta, .progress { color: #6b7280; }
section { background: var(--secondary); border-radius: 8px; padding: 1rem 1.5rem; margin: 1rem 0; }
.choices li { margin: 0.4rem 0; }
.choices li.correct { font-weight: bold; }
.choices li.selected { text-decoration: underline; }
.explanation { margin: 0.2rem 0 0 1rem; font-style: italic; font-weight: normal; }
.badge { font-size: 0.8rem; padding: 0.1rem 0.5rem; border-radius: 4px; }
.badge.correct { background: #dcfce7; }
.badge.incorrect { background: #fde2e2; }
.media { max-width: 100%; }
.error { border-left: 4px solid #ef4444; padding: 0.5rem 1rem; }
button { background: var(--primary); color: #fff; border: 0; border-radius: 4px; padding: 0.4rem 1rem; cursor: pointer; }
pre { overflow-x: auto; padding: 1rem; background: #fff; border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;
