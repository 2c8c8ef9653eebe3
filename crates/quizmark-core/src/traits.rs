//! Seams between the session runner and its host.
//!
//! [`AssetLoader`] fetches the rendering/highlighting assets a host needs
//! before a quiz can start. [`Surface`] is whatever draws views into a named
//! container: HTML, a terminal, or a test recorder.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::QuizConfig;
use crate::session::{QuestionResult, QuestionView};

// ---------------------------------------------------------------------------
// Asset loading
// ---------------------------------------------------------------------------

/// An external asset the host must load before starting a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSpec {
    /// Short name used in logs and messages (e.g. "highlight").
    pub name: String,
    /// Where to fetch it from. `http(s)://`, `file://`, or a plain path.
    pub url: String,
}

impl AssetSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A successfully loaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedAsset {
    pub name: String,
    /// Size of the fetched body in bytes.
    pub bytes: usize,
}

/// Trait for backends that fetch host assets.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    /// Human-readable loader name (e.g. "http").
    fn name(&self) -> &str;

    /// Fetch one asset.
    async fn load(&self, asset: &AssetSpec) -> anyhow::Result<LoadedAsset>;
}

// ---------------------------------------------------------------------------
// Rendering surface
// ---------------------------------------------------------------------------

/// Everything a surface may be asked to draw.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum View<'a> {
    /// Assets are still loading; the quiz cannot start yet.
    Loading,
    /// Assets failed to load.
    Unavailable { message: &'a str },
    /// Ready to start.
    Ready { title: &'a str, total: usize },
    /// A question is waiting for an answer.
    Question(QuestionView<'a>),
    /// All questions answered.
    Review {
        results: &'a [QuestionResult],
        score: u32,
        total: usize,
    },
    /// The session is over.
    Finished { score: u32, total: usize },
}

impl View<'_> {
    /// Short name of the view, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            View::Loading => "loading",
            View::Unavailable { .. } => "unavailable",
            View::Ready { .. } => "ready",
            View::Question(_) => "question",
            View::Review { .. } => "review",
            View::Finished { .. } => "finished",
        }
    }
}

/// Something that can draw views into named containers.
pub trait Surface {
    /// Replace the contents of `container` with `view`.
    fn render(&mut self, container: &str, config: &QuizConfig, view: &View<'_>);

    /// Show a message to the user outside the container (an alert box, stderr, ...).
    fn alert(&mut self, message: &str);

    /// Remove everything drawn into `container`.
    fn clear(&mut self, _container: &str) {}
}
