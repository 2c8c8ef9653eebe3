//! A [`Surface`] that keeps one HTML fragment per container.

use std::collections::HashMap;

use quizmark_core::model::QuizConfig;
use quizmark_core::traits::{Surface, View};

use crate::html::{html_escape, page, render_question, render_result, render_score};

#[derive(Debug, Clone)]
struct Drawn {
    config: QuizConfig,
    view: &'static str,
    html: String,
}

/// Renders views to HTML strings.
///
/// Each render replaces the container's previous fragment. Alerts are kept
/// in order so a host can show them however it likes.
#[derive(Debug, Default)]
pub struct HtmlSurface {
    containers: HashMap<String, Drawn>,
    alerts: Vec<String>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current fragment of `container`.
    pub fn fragment(&self, container: &str) -> Option<&str> {
        self.containers.get(container).map(|d| d.html.as_str())
    }

    /// Name of the view last drawn into `container`.
    pub fn view_name(&self, container: &str) -> Option<&'static str> {
        self.containers.get(container).map(|d| d.view)
    }

    /// The container's fragment wrapped in a complete, themed document.
    pub fn document(&self, container: &str) -> Option<String> {
        self.containers
            .get(container)
            .map(|d| page(container, &d.config, &d.html))
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

fn render_view(container: &str, view: &View<'_>) -> String {
    let mut html = format!(
        "<div id=\"{}\" class=\"quizmark\" data-view=\"{}\">\n",
        html_escape(container),
        view.name()
    );

    match view {
        View::Loading => html.push_str("<p class=\"loading\">Loading quiz...</p>\n"),
        View::Unavailable { message } => html.push_str(&format!(
            "<p class=\"error\" role=\"alert\">{}</p>\n",
            html_escape(message)
        )),
        View::Ready { title, total } => {
            html.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
            html.push_str(&format!("<p class=\"meta\">{total} questions</p>\n"));
            html.push_str("<button data-action=\"start\">Start</button>\n");
        }
        View::Question(q) => html.push_str(&render_question(q)),
        View::Review {
            results,
            score,
            total,
        } => {
            html.push_str(&render_score(*score, *total));
            for result in results.iter() {
                html.push_str(&render_result(result));
            }
            html.push_str("<button data-action=\"finish\">Finish</button>\n");
            html.push_str("<button data-action=\"restart\">Try again</button>\n");
        }
        View::Finished { score, total } => {
            html.push_str(&render_score(*score, *total));
            html.push_str("<button data-action=\"restart\">Try again</button>\n");
        }
    }

    html.push_str("</div>\n");
    html
}

impl Surface for HtmlSurface {
    fn render(&mut self, container: &str, config: &QuizConfig, view: &View<'_>) {
        let html = render_view(container, view);
        self.containers.insert(
            container.to_string(),
            Drawn {
                config: config.clone(),
                view: view.name(),
                html,
            },
        );
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!("{message}");
        self.alerts.push(message.to_string());
    }

    fn clear(&mut self, container: &str) {
        self.containers.remove(container);
    }
}
